//! Integration test for the full document pipeline: parse, subset, flatten

use openapi_scout_parser::{dereference, flatten, match_operation, parse_document, subset};

const PETSTORE_JSON: &str = r##"{
    "openapi": "3.0.2",
    "info": {
        "title": "Petstore",
        "version": "1.0.0"
    },
    "servers": [
        {"url": "https://petstore.example.com/api/v3"}
    ],
    "tags": [
        {"name": "pets", "description": "Pet management"}
    ],
    "paths": {
        "/pets": {
            "get": {
                "operationId": "listPets",
                "summary": "List all pets",
                "tags": ["pets"],
                "parameters": [
                    {
                        "name": "limit",
                        "in": "query",
                        "required": false,
                        "schema": {"type": "integer", "maximum": 100}
                    }
                ],
                "responses": {
                    "200": {
                        "description": "A paged array of pets",
                        "headers": {
                            "x-next": {
                                "schema": {"type": "string"}
                            }
                        },
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "pets": {
                                            "type": "array",
                                            "items": {"$ref": "#/components/schemas/Pet"}
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "default": {
                        "description": "unexpected error",
                        "content": {
                            "application/json": {
                                "schema": {"$ref": "#/components/schemas/Error"}
                            }
                        }
                    }
                }
            },
            "post": {
                "operationId": "createPet",
                "summary": "Create a pet",
                "tags": ["pets"],
                "requestBody": {
                    "content": {
                        "application/json": {
                            "schema": {"$ref": "#/components/schemas/NewPet"}
                        }
                    }
                },
                "responses": {
                    "201": {"description": "Created"}
                }
            }
        },
        "/pets/{petId}": {
            "parameters": [
                {
                    "name": "petId",
                    "in": "path",
                    "required": true,
                    "schema": {"type": "string"}
                }
            ],
            "get": {
                "operationId": "getPet",
                "summary": "Get a pet by id",
                "tags": ["pets"],
                "responses": {
                    "200": {
                        "description": "The pet",
                        "content": {
                            "application/json": {
                                "schema": {"$ref": "#/components/schemas/Pet"}
                            }
                        }
                    }
                }
            }
        }
    },
    "components": {
        "schemas": {
            "Pet": {
                "type": "object",
                "required": ["id", "name"],
                "properties": {
                    "id": {"type": "integer"},
                    "name": {"type": "string"},
                    "tag": {"type": "string"}
                }
            },
            "NewPet": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": {"type": "string"}
                }
            },
            "Error": {
                "type": "object",
                "properties": {
                    "code": {"type": "integer"},
                    "message": {"type": "string"}
                }
            }
        }
    }
}"##;

const OPENAPI_URL: &str = "https://petstore.example.com/openapi.json";

#[test]
fn test_flatten_petstore() {
    let document = parse_document(PETSTORE_JSON).unwrap();
    let operations = flatten(&document, Some("petstore.example.com"), OPENAPI_URL, None).unwrap();

    assert_eq!(operations.len(), 3);

    let list = operations
        .iter()
        .find(|op| op.operation_id == "listPets")
        .unwrap();
    assert_eq!(list.path, "/pets");
    assert_eq!(list.method, "get");
    assert_eq!(
        list.servers_with_origin[0]["url"],
        "https://petstore.example.com/api/v3"
    );

    // the query parameter lands in the merged input schema
    let input = list.merged_input_schema.as_ref().unwrap();
    assert!(input["properties"]["limit"].is_object());

    // output carries the response header, the body, and the status enum
    let output = list.merged_output_schema.as_ref().unwrap();
    assert!(output["properties"]["x-next"].is_object());
    assert!(output["properties"]["pets"].is_object());
    assert_eq!(output["properties"]["status"]["enum"][0], 200);

    // Pet is reachable through the response body, Error through default
    assert!(list.definitions.contains_key("Pet"));
    assert!(list.definitions.contains_key("Error"));
    assert!(!list.definitions.contains_key("NewPet"));

    // the merged schema keeps the document convention; definition bodies
    // are renamed to the bare JSON Schema one
    let pets_ref = &output["properties"]["pets"]["items"]["$ref"];
    assert_eq!(pets_ref, "#/components/schemas/Pet");
}

#[test]
fn test_flatten_uses_path_item_parameters() {
    let document = parse_document(PETSTORE_JSON).unwrap();
    let operations = flatten(&document, None, OPENAPI_URL, None).unwrap();

    let get_pet = operations
        .iter()
        .find(|op| op.operation_id == "getPet")
        .unwrap();
    let input = get_pet.merged_input_schema.as_ref().unwrap();
    assert!(input["properties"]["petId"].is_object());
    assert_eq!(input["required"][0], "petId");
}

#[test]
fn test_request_body_ref_resolved_into_input() {
    let document = parse_document(PETSTORE_JSON).unwrap();
    let operations = flatten(&document, None, OPENAPI_URL, None).unwrap();

    let create = operations
        .iter()
        .find(|op| op.operation_id == "createPet")
        .unwrap();
    let body = create.resolved_request_body_schema.as_ref().unwrap();
    assert_eq!(body["required"][0], "name");

    let input = create.merged_input_schema.as_ref().unwrap();
    assert!(input["properties"]["name"].is_object());
}

#[test]
fn test_subset_by_operation_id_inlines_and_strips() {
    let document = parse_document(PETSTORE_JSON).unwrap();
    let trimmed = subset(&document, "getPet").unwrap();

    let paths = trimmed["paths"].as_object().unwrap();
    assert_eq!(paths.len(), 1);
    assert!(paths.contains_key("/pets/{petId}"));

    // refs are inlined and the shared sections removed
    let schema = &trimmed["paths"]["/pets/{petId}"]["get"]["responses"]["200"]["content"]
        ["application/json"]["schema"];
    assert_eq!(schema["type"], "object");
    assert!(schema.get("$ref").is_none());
    assert!(trimmed.get("components").is_none());
    assert!(trimmed.get("tags").is_none());
}

#[test]
fn test_dereference_is_idempotent() {
    let document = parse_document(PETSTORE_JSON).unwrap();
    let once = dereference(&document);
    let twice = dereference(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_match_operation_across_strategies() {
    let document = parse_document(PETSTORE_JSON).unwrap();

    let direct = match_operation(&document, "/pets").unwrap();
    assert_eq!(direct.method, "GET");

    let by_id = match_operation(&document, "createPet").unwrap();
    assert_eq!(by_id.method, "POST");

    let templated = match_operation(&document, "/pets/42").unwrap();
    assert_eq!(templated.path, "/pets/{petId}");
}
