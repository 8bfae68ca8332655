//! Remote endpoint catalog.
//!
//! One [`Endpoint`] per operation of the DSpace REST API: verb, URI
//! template, the optional query parameters it accepts (in the order they are
//! sent) and the kind of result it produces.

use crate::codec::ResponseKind::{self, Bytes, Discard, Structured, Text};
use crate::error::Result;
use crate::template::{self, PathVars, QueryArgs, QueryParams};
use crate::transport::Method::{self, Delete, Get, Post, Put};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub template: &'static str,
    pub query: &'static [&'static str],
    pub kind: ResponseKind,
}

impl Endpoint {
    const fn new(
        method: Method,
        template: &'static str,
        query: &'static [&'static str],
        kind: ResponseKind,
    ) -> Self {
        Endpoint {
            method,
            template,
            query,
            kind,
        }
    }

    /// Build the request URL under `base`
    pub fn resolve(&self, base: &Url, vars: &PathVars, args: &dyn QueryArgs) -> Result<Url> {
        let query = QueryParams::declared(self.query, args);
        template::resolve(base, self.template, vars, &query)
    }
}

const NONE: &[&str] = &[];
const AUDIT: &[&str] = &["userIP", "userAgent", "xforwardedfor"];
const EXPAND: &[&str] = &["expand", "userIP", "userAgent", "xforwardedfor"];
const PAGED: &[&str] = &["limit", "offset", "userIP", "userAgent", "xforwardedfor"];
const LIST: &[&str] = &[
    "expand",
    "limit",
    "offset",
    "userIP",
    "userAgent",
    "xforwardedfor",
];
const UPLOAD: &[&str] = &[
    "name",
    "description",
    "groupId",
    "year",
    "month",
    "day",
    "userIP",
    "userAgent",
    "xforwardedfor",
];

// Root
pub const INDEX: Endpoint = Endpoint::new(Get, "/", NONE, Text);
pub const TEST: Endpoint = Endpoint::new(Get, "/test", NONE, Text);
pub const STATUS: Endpoint = Endpoint::new(Get, "/status", NONE, Structured);
pub const LOGIN: Endpoint = Endpoint::new(Post, "/login", NONE, Text);
pub const LOGOUT: Endpoint = Endpoint::new(Post, "/logout", NONE, Discard);
pub const HANDLE: Endpoint = Endpoint::new(Get, "/handle/{prefix}/{suffix}", &["expand"], Structured);

// Communities
pub const COMMUNITIES: Endpoint = Endpoint::new(Get, "/communities", LIST, Structured);
pub const TOP_COMMUNITIES: Endpoint =
    Endpoint::new(Get, "/communities/top-communities", LIST, Structured);
pub const COMMUNITY: Endpoint = Endpoint::new(Get, "/communities/{community_id}", EXPAND, Structured);
pub const CREATE_COMMUNITY: Endpoint = Endpoint::new(Post, "/communities", AUDIT, Structured);
pub const UPDATE_COMMUNITY: Endpoint = Endpoint::new(Put, "/communities/{community_id}", AUDIT, Discard);
pub const DELETE_COMMUNITY: Endpoint =
    Endpoint::new(Delete, "/communities/{community_id}", AUDIT, Discard);
pub const COMMUNITY_COMMUNITIES: Endpoint =
    Endpoint::new(Get, "/communities/{community_id}/communities", LIST, Structured);
pub const ADD_COMMUNITY_COMMUNITY: Endpoint =
    Endpoint::new(Post, "/communities/{community_id}/communities", AUDIT, Structured);
pub const DELETE_COMMUNITY_COMMUNITY: Endpoint = Endpoint::new(
    Delete,
    "/communities/{community_id}/communities/{subcommunity_id}",
    AUDIT,
    Discard,
);
pub const COMMUNITY_COLLECTIONS: Endpoint =
    Endpoint::new(Get, "/communities/{community_id}/collections", LIST, Structured);
pub const ADD_COMMUNITY_COLLECTION: Endpoint =
    Endpoint::new(Post, "/communities/{community_id}/collections", AUDIT, Structured);
pub const DELETE_COMMUNITY_COLLECTION: Endpoint = Endpoint::new(
    Delete,
    "/communities/{community_id}/collections/{collection_id}",
    AUDIT,
    Discard,
);

// Collections
pub const COLLECTIONS: Endpoint = Endpoint::new(Get, "/collections", LIST, Structured);
pub const COLLECTION: Endpoint = Endpoint::new(Get, "/collections/{collection_id}", LIST, Structured);
pub const UPDATE_COLLECTION: Endpoint =
    Endpoint::new(Put, "/collections/{collection_id}", AUDIT, Discard);
pub const DELETE_COLLECTION: Endpoint =
    Endpoint::new(Delete, "/collections/{collection_id}", AUDIT, Discard);
pub const COLLECTION_ITEMS: Endpoint =
    Endpoint::new(Get, "/collections/{collection_id}/items", LIST, Structured);
pub const ADD_COLLECTION_ITEM: Endpoint =
    Endpoint::new(Post, "/collections/{collection_id}/items", AUDIT, Structured);
pub const DELETE_COLLECTION_ITEM: Endpoint = Endpoint::new(
    Delete,
    "/collections/{collection_id}/items/{item_id}",
    AUDIT,
    Discard,
);
pub const FIND_COLLECTION: Endpoint =
    Endpoint::new(Post, "/collections/find-collection", NONE, Structured);

// Items
pub const ITEMS: Endpoint = Endpoint::new(Get, "/items", LIST, Structured);
pub const ITEM: Endpoint = Endpoint::new(Get, "/items/{item_id}", EXPAND, Structured);
pub const DELETE_ITEM: Endpoint = Endpoint::new(Delete, "/items/{item_id}", AUDIT, Discard);
pub const ITEM_METADATA: Endpoint = Endpoint::new(Get, "/items/{item_id}/metadata", AUDIT, Structured);
pub const ADD_ITEM_METADATA: Endpoint =
    Endpoint::new(Post, "/items/{item_id}/metadata", AUDIT, Discard);
pub const UPDATE_ITEM_METADATA: Endpoint =
    Endpoint::new(Put, "/items/{item_id}/metadata", AUDIT, Discard);
pub const DELETE_ITEM_METADATA: Endpoint =
    Endpoint::new(Delete, "/items/{item_id}/metadata", AUDIT, Discard);
pub const ITEM_BITSTREAMS: Endpoint =
    Endpoint::new(Get, "/items/{item_id}/bitstreams", PAGED, Structured);
pub const ADD_ITEM_BITSTREAM: Endpoint =
    Endpoint::new(Post, "/items/{item_id}/bitstreams", UPLOAD, Structured);
pub const DELETE_ITEM_BITSTREAM: Endpoint = Endpoint::new(
    Delete,
    "/items/{item_id}/bitstreams/{bitstream_id}",
    AUDIT,
    Discard,
);
pub const FIND_ITEMS_BY_METADATA: Endpoint =
    Endpoint::new(Post, "/items/find-by-metadata-field", EXPAND, Structured);

// Bitstreams
pub const BITSTREAMS: Endpoint = Endpoint::new(Get, "/bitstreams", LIST, Structured);
pub const BITSTREAM: Endpoint = Endpoint::new(Get, "/bitstreams/{bitstream_id}", EXPAND, Structured);
pub const UPDATE_BITSTREAM: Endpoint =
    Endpoint::new(Put, "/bitstreams/{bitstream_id}", AUDIT, Discard);
pub const DELETE_BITSTREAM: Endpoint =
    Endpoint::new(Delete, "/bitstreams/{bitstream_id}", AUDIT, Discard);
pub const BITSTREAM_DATA: Endpoint =
    Endpoint::new(Get, "/bitstreams/{bitstream_id}/retrieve", AUDIT, Bytes);
pub const UPDATE_BITSTREAM_DATA: Endpoint =
    Endpoint::new(Put, "/bitstreams/{bitstream_id}/data", AUDIT, Discard);
pub const BITSTREAM_POLICIES: Endpoint =
    Endpoint::new(Get, "/bitstreams/{bitstream_id}/policy", NONE, Structured);
pub const ADD_BITSTREAM_POLICY: Endpoint =
    Endpoint::new(Post, "/bitstreams/{bitstream_id}/policy", AUDIT, Discard);
pub const DELETE_BITSTREAM_POLICY: Endpoint = Endpoint::new(
    Delete,
    "/bitstreams/{bitstream_id}/policy/{policy_id}",
    AUDIT,
    Discard,
);

/// Every endpoint of the catalog
pub const ALL: &[Endpoint] = &[
    INDEX,
    TEST,
    STATUS,
    LOGIN,
    LOGOUT,
    HANDLE,
    COMMUNITIES,
    TOP_COMMUNITIES,
    COMMUNITY,
    CREATE_COMMUNITY,
    UPDATE_COMMUNITY,
    DELETE_COMMUNITY,
    COMMUNITY_COMMUNITIES,
    ADD_COMMUNITY_COMMUNITY,
    DELETE_COMMUNITY_COMMUNITY,
    COMMUNITY_COLLECTIONS,
    ADD_COMMUNITY_COLLECTION,
    DELETE_COMMUNITY_COLLECTION,
    COLLECTIONS,
    COLLECTION,
    UPDATE_COLLECTION,
    DELETE_COLLECTION,
    COLLECTION_ITEMS,
    ADD_COLLECTION_ITEM,
    DELETE_COLLECTION_ITEM,
    FIND_COLLECTION,
    ITEMS,
    ITEM,
    DELETE_ITEM,
    ITEM_METADATA,
    ADD_ITEM_METADATA,
    UPDATE_ITEM_METADATA,
    DELETE_ITEM_METADATA,
    ITEM_BITSTREAMS,
    ADD_ITEM_BITSTREAM,
    DELETE_ITEM_BITSTREAM,
    FIND_ITEMS_BY_METADATA,
    BITSTREAMS,
    BITSTREAM,
    UPDATE_BITSTREAM,
    DELETE_BITSTREAM,
    BITSTREAM_DATA,
    UPDATE_BITSTREAM_DATA,
    BITSTREAM_POLICIES,
    ADD_BITSTREAM_POLICY,
    DELETE_BITSTREAM_POLICY,
];
