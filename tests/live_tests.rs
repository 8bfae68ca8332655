//! Tests against a real DSpace server.
//!
//! Configure with `DSPACE_URL` (defaults to the public demo),
//! `DSPACE_EMAIL` and `DSPACE_PASSWORD`.
//! Run with: cargo test --test live_tests -- --ignored

use dspace_rest::{
    BitstreamUpload, Collection, Community, Config, Item, MetadataEntry, RequestOptions,
    RestClient, UploadStream, User, DEMO_BASE_URL,
};
use sha2::{Digest, Sha256};
use std::env;

fn client() -> RestClient {
    let url = env::var("DSPACE_URL").unwrap_or_else(|_| DEMO_BASE_URL.to_string());
    RestClient::new(Config::new(&url).expect("valid DSPACE_URL")).expect("client")
}

fn credentials() -> User {
    User::new(
        env::var("DSPACE_EMAIL").expect("DSPACE_EMAIL"),
        env::var("DSPACE_PASSWORD").expect("DSPACE_PASSWORD"),
    )
}

fn calculate_sha256(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

#[test]
#[ignore]
fn test_api_is_running() {
    let client = client();
    assert_eq!(client.test().unwrap(), "REST api is running.");
    assert!(!client.index_html().unwrap().is_empty());
}

#[test]
#[ignore]
fn test_bad_login_is_forbidden() {
    let client = client();
    let err = client
        .login(&User::new("nobody@example.org", "not a password"))
        .unwrap_err();
    assert!(err.is_forbidden(), "{:?}", err);
    assert!(client.token().is_none());
}

#[test]
#[ignore]
fn test_anonymous_logout_is_bad_request() {
    let err = client().logout().unwrap_err();
    assert!(err.is_bad_request(), "{:?}", err);
}

#[test]
#[ignore]
fn test_top_communities() {
    let communities = client()
        .top_communities(&RequestOptions::new().limit(5))
        .unwrap();
    println!("Top communities: {:?}", communities);
}

#[test]
#[ignore]
fn test_full_lifecycle() {
    let client = client();
    client.login(&credentials()).unwrap();
    let none = RequestOptions::new();

    let community = client
        .create_community(&Community::named("dspace-rest live test"), &none)
        .unwrap();
    let community_id = community.id.unwrap();

    let collection = client
        .add_community_collection(community_id, &Collection::named("Test collection"), &none)
        .unwrap();
    let collection_id = collection.id.unwrap();

    let read = client.collection(collection_id, &none).unwrap();
    assert_eq!(read.name.as_deref(), Some("Test collection"));

    let item = Item {
        metadata: vec![
            MetadataEntry::new("dc.title", "Logo IDM"),
            MetadataEntry::new("dc.description", "五个汉字"),
        ],
        ..Default::default()
    };
    let item = client.add_collection_item(collection_id, &item, &none).unwrap();
    println!("Created item name as returned: {:?}", item.name);
    let item_id = item.id.unwrap();

    let data = "五个汉字字\n".as_bytes().to_vec();
    let bitstream = client
        .add_item_bitstream(
            item_id,
            &BitstreamUpload::new("chinese.txt").with_description("五个汉字"),
            UploadStream::from_bytes(data.clone()).with_content_type("text/plain"),
        )
        .unwrap();
    let downloaded = client
        .bitstream_data(bitstream.id.unwrap(), &none)
        .unwrap();
    assert_eq!(calculate_sha256(&downloaded), calculate_sha256(&data));

    client.delete_item(item_id, &none).unwrap();
    client.delete_collection(collection_id, &none).unwrap();
    assert!(client
        .collection(collection_id, &none)
        .unwrap_err()
        .is_not_found());
    client.delete_community(community_id, &none).unwrap();

    client.logout().unwrap();
    assert!(client.token().is_none());
}
