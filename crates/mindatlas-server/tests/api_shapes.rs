//! API shape tests — validates that response bodies match what the frontend
//! expects, field by field.

use serde_json::json;

/// GET /api/mindmap success body: `{topic, root}` with recursive node shape
/// `{title, image, learn_more, bulletPoints[], children[]}`.
#[test]
fn mindmap_response_shape() {
    let response = json!({
        "topic": "Solar Energy",
        "root": {
            "title": "Solar Energy",
            "image": "",
            "learn_more": "https://en.wikipedia.org/wiki/Solar_Energy",
            "bulletPoints": ["Converts sunlight to electricity"],
            "children": [
                {
                    "title": "Photovoltaics",
                    "image": "",
                    "learn_more": "",
                    "bulletPoints": [],
                    "children": [],
                }
            ],
        },
    });

    assert!(response["topic"].is_string());
    assert!(response["root"].is_object());
    assert!(response["root"]["title"].is_string());
    assert!(response["root"]["learn_more"].is_string());
    assert!(response["root"]["bulletPoints"].is_array());
    assert!(response["root"]["children"].is_array());

    let child = &response["root"]["children"][0];
    assert!(child["title"].is_string());
    assert!(child["bulletPoints"].is_array());
    assert!(child["children"].is_array());
}

/// Upload success body consumed by the documents page.
#[test]
fn upload_response_shape() {
    let response = json!({
        "success": true,
        "message": "File uploaded successfully",
        "document_id": 7,
        "filename": "notes.pdf",
        "size": 52413,
    });

    assert!(response["success"].is_boolean());
    assert!(response["message"].is_string());
    assert!(response["document_id"].is_number());
    assert!(response["filename"].is_string());
    assert!(response["size"].is_number());
}

/// Document listing body: `{documents: [{id, filename, file_size,
/// uploaded_at}]}`, newest first.
#[test]
fn user_documents_response_shape() {
    let response = json!({
        "documents": [
            {
                "id": 2,
                "filename": "later.pdf",
                "file_size": 1024,
                "uploaded_at": 1_754_000_100,
            },
            {
                "id": 1,
                "filename": "earlier.pdf",
                "file_size": 2048,
                "uploaded_at": 1_754_000_000,
            }
        ],
    });

    let docs = response["documents"].as_array().unwrap();
    assert!(docs[0]["id"].is_number());
    assert!(docs[0]["filename"].is_string());
    assert!(docs[0]["file_size"].is_number());
    assert!(docs[0]["uploaded_at"].is_number());
    // Newest first.
    assert!(docs[0]["uploaded_at"].as_i64() >= docs[1]["uploaded_at"].as_i64());
}

/// Error envelope: `{error}` everywhere, plus `hint` on 502.
#[test]
fn error_envelope_shapes() {
    let client_error = json!({ "error": "Missing 'topic' query parameter" });
    assert!(client_error["error"].is_string());

    let upstream = json!({
        "error": "Unable to list available models with provided API key.",
        "hint": "Try creating an API key at https://aistudio.google.com/app/apikey and set GEMINI_API_KEY.",
    });
    assert!(upstream["error"].is_string());
    assert!(upstream["hint"].is_string());

    let not_found = json!({ "error": "Not found", "path": "/api/nope" });
    assert!(not_found["path"].is_string());
}

/// Auth bodies: `ok` on every success, `token` + `user` on login.
#[test]
fn auth_response_shapes() {
    let login = json!({
        "ok": true,
        "token": "3e1cc2f0-0f2b-4f2a-9b1e-7f6f1b1f2a3c",
        "user": { "id": 1, "fullName": "Ada Lovelace", "email": "ada@example.com" },
    });
    assert!(login["ok"].is_boolean());
    assert!(login["token"].is_string());
    assert!(login["user"]["id"].is_number());
    assert!(login["user"]["fullName"].is_string());
    assert!(login["user"]["email"].is_string());

    let registered = json!({ "ok": true });
    assert!(registered["ok"].is_boolean());

    let session = json!({
        "ok": true,
        "user": { "id": 1, "fullName": "Ada Lovelace", "email": "ada@example.com" },
    });
    assert!(session["user"].is_object());
}

/// Delete body.
#[test]
fn delete_response_shape() {
    let response = json!({ "success": true, "message": "Document deleted successfully" });
    assert!(response["success"].is_boolean());
    assert!(response["message"].is_string());
}
