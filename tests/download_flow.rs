//! Download, bucket-fetch, and delete round trips against a mock backend.

use serde_json::json;
use sharebox::{ApiClient, ApiConfig, ApiError, ContentTree, DownloadClient, DownloadError};

#[tokio::test]
async fn download_round_trip_writes_the_blob_to_disk() {
    let mut server = mockito::Server::new_async().await;
    let issue = server
        .mock("GET", "/buckets/b1/files/f1/download")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "url": format!("{}/blob", server.url()) }).to_string())
        .create_async()
        .await;
    let blob = server
        .mock("GET", "/blob")
        .with_status(200)
        .with_body("hello sharebox")
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("saved").join("report.pdf");

    let client = DownloadClient::new(ApiClient::new(ApiConfig::new(server.url())));
    let written = client.download_to("b1", "f1", &destination).await.unwrap();

    assert_eq!(written, 14);
    assert_eq!(std::fs::read(&destination).unwrap(), b"hello sharebox");
    issue.assert_async().await;
    blob.assert_async().await;
}

#[tokio::test]
async fn issuance_failure_surfaces_as_download_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/buckets/b1/files/missing/download")
        .with_status(404)
        .create_async()
        .await;

    let client = DownloadClient::new(ApiClient::new(ApiConfig::new(server.url())));
    let dir = tempfile::tempdir().unwrap();
    let err = client
        .download_to("b1", "missing", &dir.path().join("never.bin"))
        .await
        .unwrap_err();

    match err {
        DownloadError::Status(status) => assert_eq!(status.as_u16(), 404),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn delete_file_hits_the_delete_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let delete = server
        .mock("DELETE", "/buckets/b1/files/f1")
        .with_status(204)
        .create_async()
        .await;

    let api = ApiClient::new(ApiConfig::new(server.url()));
    api.delete_file("b1", "f1").await.unwrap();
    delete.assert_async().await;

    server
        .mock("DELETE", "/buckets/b1/files/locked")
        .with_status(403)
        .create_async()
        .await;
    match api.delete_file("b1", "locked").await.unwrap_err() {
        ApiError::Status(status) => assert_eq!(status.as_u16(), 403),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn bucket_fetch_feeds_the_content_tree() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/buckets/b1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "b1",
                "name": "shared",
                "owner": "u1",
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-02T00:00:00Z",
                "files": [
                    {
                        "id": "folder-1",
                        "name": "docs",
                        "path": "/",
                        "created_at": "2024-01-01T00:00:00Z",
                        "files": [
                            {
                                "id": "file-2",
                                "name": "spec.pdf",
                                "size": 1024,
                                "extension": "pdf",
                                "path": "/docs",
                                "created_at": "2024-01-01T00:00:00Z"
                            }
                        ]
                    },
                    {
                        "id": "file-1",
                        "name": "notes.txt",
                        "size": 64,
                        "extension": "txt",
                        "path": "/",
                        "created_at": "2024-01-01T00:00:00Z"
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let api = ApiClient::new(ApiConfig::new(server.url()));
    let bucket = api.bucket("b1").await.unwrap();
    assert_eq!(bucket.files.len(), 2);

    let tree = ContentTree::new(&bucket.files);
    let root: Vec<&str> = tree.children_of("/").iter().map(|r| r.id.as_str()).collect();
    assert_eq!(root, vec!["folder-1", "file-1"]);
    assert_eq!(tree.folders_of("/").len(), 1);
    assert_eq!(tree.files_of("/").len(), 1);

    let docs: Vec<&str> = tree
        .children_of("/docs")
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(docs, vec!["file-2"]);
}
