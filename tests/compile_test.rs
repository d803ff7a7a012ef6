use jmxforge::{CompileError, SpecEncoding, TestPlanConfig, compile, compile_with_hint};
use std::fs;

fn config(base_url: &str) -> TestPlanConfig {
    TestPlanConfig {
        thread_count: 5,
        ramp_up_seconds: 2,
        loop_count: 3,
        base_url: base_url.to_string(),
        test_plan_name: "Integration Plan".to_string(),
    }
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Values of every `<stringProp name="{name}">` element, unescaped
fn string_props(xml: &str, name: &str) -> Vec<String> {
    let open = format!("<stringProp name=\"{}\">", name);
    xml.split(&open)
        .skip(1)
        .filter_map(|rest| rest.split_once("</stringProp>"))
        .map(|(value, _)| unescape(value))
        .collect()
}

fn sampler_names(xml: &str) -> Vec<String> {
    xml.split("<HTTPSamplerProxy ")
        .skip(1)
        .filter_map(|rest| rest.split_once("testname=\"").map(|(_, tail)| tail))
        .filter_map(|tail| tail.split_once('"').map(|(name, _)| unescape(name)))
        .collect()
}

#[test]
fn minimal_document_has_no_samplers_and_two_collectors() {
    for raw in [
        r#"{"openapi": "3.0.0", "paths": {}}"#,
        "swagger: '2.0'\npaths: {}\n",
    ] {
        let xml = compile(raw, &config("https://api.example.com")).unwrap().into_string();
        assert_eq!(xml.matches("<HTTPSamplerProxy ").count(), 0);
        assert_eq!(xml.matches("<ResultCollector ").count(), 2);
        assert!(xml.contains(r#"guiclass="ViewResultsFullVisualizer""#));
        assert!(xml.contains(r#"guiclass="SummaryReport""#));
    }
}

#[test]
fn every_method_is_emitted_uppercase() {
    let raw = r#"
openapi: 3.0.0
paths:
  /r:
    get: {}
    post: {}
    put: {}
    delete: {}
    patch: {}
    head: {}
    options: {}
"#;
    let xml = compile(raw, &config("https://api.example.com")).unwrap().into_string();
    assert_eq!(
        string_props(&xml, "HTTPSampler.method"),
        vec!["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"]
    );
}

#[test]
fn get_and_post_round_trip() {
    let raw = r#"
openapi: 3.0.0
paths:
  /items:
    get:
      operationId: listItems
    post:
      operationId: createItem
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                id:
                  type: integer
                name:
                  type: string
"#;
    let xml = compile(raw, &config("https://api.example.com")).unwrap().into_string();

    assert_eq!(sampler_names(&xml), vec!["listItems", "createItem"]);
    assert_eq!(xml.matches("HTTPSampler.postBodyRaw").count(), 1);

    let bodies: Vec<_> = string_props(&xml, "Argument.value")
        .into_iter()
        .filter(|value| value.starts_with('{'))
        .collect();
    assert_eq!(bodies.len(), 1);

    let body: serde_json::Value = serde_json::from_str(&bodies[0]).unwrap();
    let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["id", "name"]);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "sampleName");
}

#[test]
fn missing_version_marker_is_reported() {
    let err = compile(r#"{"info": {"title": "x"}, "paths": {}}"#, &config("")).unwrap_err();
    assert!(matches!(err, CompileError::MissingVersionMarker));
    assert!(err.to_string().contains("openapi"));
}

#[test]
fn malformed_and_misshapen_documents() {
    assert!(matches!(
        compile("{\"openapi\": ", &config("")),
        Err(CompileError::MalformedSpec { .. })
    ));
    assert!(matches!(
        compile("[1, 2, 3]", &config("")),
        Err(CompileError::InvalidSpecShape(_))
    ));
    assert!(matches!(
        compile("openapi: 3.0.0\npaths: nope\n", &config("")),
        Err(CompileError::MissingPaths)
    ));
}

#[test]
fn request_defaults_from_base_url() {
    let xml = compile(
        r#"{"openapi": "3.0.0", "paths": {}}"#,
        &config("https://api.example.com/v1"),
    )
    .unwrap()
    .into_string();

    assert_eq!(string_props(&xml, "HTTPSampler.domain"), vec!["api.example.com"]);
    assert_eq!(string_props(&xml, "HTTPSampler.protocol"), vec!["https"]);
    assert_eq!(string_props(&xml, "HTTPSampler.path"), vec!["/v1"]);
}

#[test]
fn openapi_fixture_end_to_end() {
    let raw = fs::read_to_string("tests/fixtures/openapi.yaml").unwrap();
    let xml = compile_with_hint(&raw, Some(SpecEncoding::Yaml), &config(""))
        .unwrap()
        .into_string();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<jmeterTestPlan"));
    assert_eq!(
        sampler_names(&xml),
        vec![
            "listUsers",
            "createUser",
            "Fetch one user",
            "updateUser",
            "DELETE /users/{userId}",
            "updateFriendship",
            "HEAD /users/{userId}/friends/{friendId}",
            "OPTIONS /users/{userId}/friends/{friendId}",
            "createCategory",
        ]
    );

    // request defaults come from the declared server; sampler paths are prefixed
    let paths = string_props(&xml, "HTTPSampler.path");
    assert_eq!(paths[0], "/v1");
    assert_eq!(paths[1], "/v1/users");
    assert_eq!(paths[3], "/v1/users/${userId}");
    assert_eq!(paths[6], "/v1/users/${userId}/friends/${friendId}");

    let bodies: Vec<serde_json::Value> = string_props(&xml, "Argument.value")
        .into_iter()
        .filter(|value| value.starts_with('{'))
        .map(|value| serde_json::from_str(&value).unwrap())
        .collect();
    assert_eq!(bodies.len(), 4);

    assert_eq!(
        bodies[0],
        serde_json::json!({
            "id": 1,
            "name": "sampleName",
            "email": "user@example.com",
            "age": 25,
            "active": true,
            "address": {
                "street": "sample",
                "city": "Sample City",
                "country": "Sample Country"
            },
            "roles": ["admin"]
        })
    );
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(
        bodies[2],
        serde_json::json!({
            "status": "accepted",
            "note": "Met at \"RustConf\" <2024> & after"
        })
    );
    assert_eq!(
        bodies[3],
        serde_json::json!({ "title": "sample", "parent": null, "children": [null] })
    );

    // markup-significant characters never appear raw inside values
    assert!(xml.contains("&lt;2024&gt; &amp; after"));
    assert!(!xml.contains("<2024>"));
}

#[test]
fn swagger_fixture_end_to_end() {
    let raw = fs::read_to_string("tests/fixtures/swagger.json").unwrap();
    let xml = compile_with_hint(&raw, Some(SpecEncoding::Json), &config(""))
        .unwrap()
        .into_string();

    assert_eq!(sampler_names(&xml), vec!["listPets", "addPet", "Remove a pet"]);
    assert_eq!(string_props(&xml, "HTTPSampler.domain")[0], "petstore.example.com");
    assert_eq!(string_props(&xml, "HTTPSampler.protocol")[0], "http");

    let body = string_props(&xml, "Argument.value")
        .into_iter()
        .find(|value| value.starts_with('{'))
        .unwrap();
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "petId": 1, "name": "sampleName", "price": 99.99, "hidden": false })
    );
}

#[test]
fn unresolvable_reference_fails_the_compile() {
    let raw = r#"
openapi: 3.0.0
paths:
  /a:
    post:
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                owner:
                  $ref: '#/components/schemas/Owner'
"#;
    let err = compile(raw, &config("https://x.test")).unwrap_err();
    match err {
        CompileError::UnresolvableReference { pointer } => {
            assert_eq!(pointer, "#/components/schemas/Owner")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn identical_input_gives_identical_output() {
    let raw = fs::read_to_string("tests/fixtures/openapi.yaml").unwrap();
    let first = compile(&raw, &config("https://api.example.com")).unwrap();
    let second = compile(&raw, &config("https://api.example.com")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn concurrent_compiles_do_not_share_counters() {
    let raw = r#"
openapi: 3.0.0
paths:
  /a:
    post:
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                id: { type: integer }
                refId: { type: string }
"#;
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let raw = raw.to_string();
            std::thread::spawn(move || compile(&raw, &config("https://x.test")).unwrap())
        })
        .collect();

    for handle in handles {
        let xml = handle.join().unwrap().into_string();
        let body = string_props(&xml, "Argument.value")
            .into_iter()
            .find(|value| value.starts_with('{'))
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body, serde_json::json!({ "id": 1, "refId": "2" }));
    }
}

#[test]
fn oversized_min_length_still_compiles() {
    for min_length in [9223372036854775808u64, 1000000000000] {
        let raw = serde_json::json!({
            "openapi": "3.0.0",
            "paths": { "/codes": { "post": { "requestBody": { "content": { "application/json": {
                "schema": {
                    "type": "object",
                    "properties": { "code": { "type": "string", "minLength": min_length } }
                }
            } } } } } }
        })
        .to_string();
        let xml = compile(&raw, &config("https://x.test")).unwrap().into_string();
        let body = string_props(&xml, "Argument.value")
            .into_iter()
            .find(|value| value.starts_with('{'))
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["code"].as_str().unwrap().len(), 1024);
    }
}

#[test]
fn blank_operation_id_falls_back_to_summary() {
    let raw = r#"
openapi: 3.0.0
paths:
  /a:
    get:
      operationId: ""
      summary: Fetch a
    delete:
      operationId: "  "
      summary: ""
"#;
    let xml = compile(raw, &config("https://x.test")).unwrap().into_string();
    assert_eq!(sampler_names(&xml), vec!["Fetch a", "DELETE /a"]);
}

#[test]
fn control_characters_are_dropped_from_output() {
    let raw = "{\"openapi\": \"3.0.0\", \"paths\": {\"/a\": {\"get\": {\"summary\": \"bell\\u0007 and\\u0001 nul\"}}}}";
    let cfg = TestPlanConfig {
        test_plan_name: "Plan\u{1b}[0m".to_string(),
        ..config("https://x.test")
    };
    let xml = compile(raw, &cfg).unwrap().into_string();

    assert!(!xml.chars().any(|c| c < ' ' && !matches!(c, '\t' | '\n' | '\r')));
    assert_eq!(sampler_names(&xml), vec!["bell and nul"]);
    assert!(xml.contains(r#"testname="Plan[0m""#));
}
