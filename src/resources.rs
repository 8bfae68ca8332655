//! Typed operations, one per remote endpoint.
//!
//! Each operation supplies its catalog entry, path variables and optional
//! query parameters to the dispatcher. Request bodies are encoded before
//! anything is sent.

use crate::catalog::{self, Endpoint};
use crate::codec::{Entity, MediaType};
use crate::error::Result;
use crate::models::{
    Bitstream, Collection, Community, Item, MetadataEntries, MetadataEntry, ResourcePolicy,
};
use crate::options::RequestOptions;
use crate::rest::RestClient;
use crate::template::PathVars;
use crate::upload::{BitstreamUpload, UploadStream};
use serde::de::DeserializeOwned;
use serde::Serialize;

impl RestClient {
    fn get<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        vars: PathVars,
        opts: &RequestOptions,
    ) -> Result<T> {
        self.apply(endpoint, &vars, opts, Entity::Empty)
    }

    fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        vars: PathVars,
        opts: &RequestOptions,
        body: &B,
    ) -> Result<T> {
        let entity = self.entity(body)?;
        self.apply(endpoint, &vars, opts, entity)
    }

    fn send_unit<B: Serialize>(
        &self,
        endpoint: &Endpoint,
        vars: PathVars,
        opts: &RequestOptions,
        body: &B,
    ) -> Result<()> {
        let entity = self.entity(body)?;
        self.do_request(endpoint, &vars, opts, entity).map(|_| ())
    }

    fn metadata_entity(&self, metadata: &[MetadataEntry]) -> Result<Entity> {
        match self.config().media_type() {
            MediaType::Json => self.entity(&metadata),
            MediaType::Xml => self.entity(&MetadataEntries { entries: metadata }),
        }
    }

    fn remove(&self, endpoint: &Endpoint, vars: PathVars, opts: &RequestOptions) -> Result<()> {
        self.do_request(endpoint, &vars, opts, Entity::Empty)
            .map(|_| ())
    }

    /// Liveness check; a running server answers "REST api is running."
    pub fn test(&self) -> Result<String> {
        let payload = self.do_request(&catalog::TEST, &PathVars::new(), &(), Entity::Empty)?;
        Ok(payload.into_text()?.unwrap_or_default())
    }

    /// HTML index page listing the API
    pub fn index_html(&self) -> Result<String> {
        let payload = self.do_request(&catalog::INDEX, &PathVars::new(), &(), Entity::Empty)?;
        Ok(payload.into_text()?.unwrap_or_default())
    }

    /// Resolve a handle to the object it names. Use `serde_json::Value` when
    /// the kind of object is not known in advance.
    pub fn get_object<T: DeserializeOwned>(
        &self,
        prefix: &str,
        suffix: &str,
        opts: &RequestOptions,
    ) -> Result<T> {
        let vars = PathVars::new().var("prefix", prefix).var("suffix", suffix);
        self.get(&catalog::HANDLE, vars, opts)
    }

    // Communities

    pub fn communities(&self, opts: &RequestOptions) -> Result<Vec<Community>> {
        self.get(&catalog::COMMUNITIES, PathVars::new(), opts)
    }

    pub fn top_communities(&self, opts: &RequestOptions) -> Result<Vec<Community>> {
        self.get(&catalog::TOP_COMMUNITIES, PathVars::new(), opts)
    }

    pub fn community(&self, community_id: i64, opts: &RequestOptions) -> Result<Community> {
        let vars = PathVars::new().var("community_id", community_id);
        self.get(&catalog::COMMUNITY, vars, opts)
    }

    /// Create a top level community
    pub fn create_community(&self, community: &Community, opts: &RequestOptions) -> Result<Community> {
        self.send(&catalog::CREATE_COMMUNITY, PathVars::new(), opts, community)
    }

    pub fn update_community(
        &self,
        community_id: i64,
        community: &Community,
        opts: &RequestOptions,
    ) -> Result<()> {
        let vars = PathVars::new().var("community_id", community_id);
        self.send_unit(&catalog::UPDATE_COMMUNITY, vars, opts, community)
    }

    pub fn delete_community(&self, community_id: i64, opts: &RequestOptions) -> Result<()> {
        let vars = PathVars::new().var("community_id", community_id);
        self.remove(&catalog::DELETE_COMMUNITY, vars, opts)
    }

    pub fn community_communities(
        &self,
        community_id: i64,
        opts: &RequestOptions,
    ) -> Result<Vec<Community>> {
        let vars = PathVars::new().var("community_id", community_id);
        self.get(&catalog::COMMUNITY_COMMUNITIES, vars, opts)
    }

    /// Create a sub-community under `community_id`
    pub fn add_community_community(
        &self,
        community_id: i64,
        community: &Community,
        opts: &RequestOptions,
    ) -> Result<Community> {
        let vars = PathVars::new().var("community_id", community_id);
        self.send(&catalog::ADD_COMMUNITY_COMMUNITY, vars, opts, community)
    }

    pub fn delete_community_community(
        &self,
        community_id: i64,
        subcommunity_id: i64,
        opts: &RequestOptions,
    ) -> Result<()> {
        let vars = PathVars::new()
            .var("community_id", community_id)
            .var("subcommunity_id", subcommunity_id);
        self.remove(&catalog::DELETE_COMMUNITY_COMMUNITY, vars, opts)
    }

    pub fn community_collections(
        &self,
        community_id: i64,
        opts: &RequestOptions,
    ) -> Result<Vec<Collection>> {
        let vars = PathVars::new().var("community_id", community_id);
        self.get(&catalog::COMMUNITY_COLLECTIONS, vars, opts)
    }

    /// Create a collection under `community_id`
    pub fn add_community_collection(
        &self,
        community_id: i64,
        collection: &Collection,
        opts: &RequestOptions,
    ) -> Result<Collection> {
        let vars = PathVars::new().var("community_id", community_id);
        self.send(&catalog::ADD_COMMUNITY_COLLECTION, vars, opts, collection)
    }

    pub fn delete_community_collection(
        &self,
        community_id: i64,
        collection_id: i64,
        opts: &RequestOptions,
    ) -> Result<()> {
        let vars = PathVars::new()
            .var("community_id", community_id)
            .var("collection_id", collection_id);
        self.remove(&catalog::DELETE_COMMUNITY_COLLECTION, vars, opts)
    }

    // Collections

    pub fn collections(&self, opts: &RequestOptions) -> Result<Vec<Collection>> {
        self.get(&catalog::COLLECTIONS, PathVars::new(), opts)
    }

    pub fn collection(&self, collection_id: i64, opts: &RequestOptions) -> Result<Collection> {
        let vars = PathVars::new().var("collection_id", collection_id);
        self.get(&catalog::COLLECTION, vars, opts)
    }

    pub fn update_collection(
        &self,
        collection_id: i64,
        collection: &Collection,
        opts: &RequestOptions,
    ) -> Result<()> {
        let vars = PathVars::new().var("collection_id", collection_id);
        self.send_unit(&catalog::UPDATE_COLLECTION, vars, opts, collection)
    }

    pub fn delete_collection(&self, collection_id: i64, opts: &RequestOptions) -> Result<()> {
        let vars = PathVars::new().var("collection_id", collection_id);
        self.remove(&catalog::DELETE_COLLECTION, vars, opts)
    }

    pub fn collection_items(&self, collection_id: i64, opts: &RequestOptions) -> Result<Vec<Item>> {
        let vars = PathVars::new().var("collection_id", collection_id);
        self.get(&catalog::COLLECTION_ITEMS, vars, opts)
    }

    /// Create an item in `collection_id`. The item's `name` in the answer may
    /// be missing even when a `dc.title` was given.
    pub fn add_collection_item(
        &self,
        collection_id: i64,
        item: &Item,
        opts: &RequestOptions,
    ) -> Result<Item> {
        let vars = PathVars::new().var("collection_id", collection_id);
        self.send(&catalog::ADD_COLLECTION_ITEM, vars, opts, item)
    }

    pub fn delete_collection_item(
        &self,
        collection_id: i64,
        item_id: i64,
        opts: &RequestOptions,
    ) -> Result<()> {
        let vars = PathVars::new()
            .var("collection_id", collection_id)
            .var("item_id", item_id);
        self.remove(&catalog::DELETE_COLLECTION_ITEM, vars, opts)
    }

    /// Look up a collection by its exact name. The name is sent as a plain
    /// text body.
    pub fn find_collection_by_name(&self, name: &str) -> Result<Option<Collection>> {
        let entity = Entity::Text(name.to_string());
        self.apply(&catalog::FIND_COLLECTION, &PathVars::new(), &(), entity)
    }

    // Items

    pub fn items(&self, opts: &RequestOptions) -> Result<Vec<Item>> {
        self.get(&catalog::ITEMS, PathVars::new(), opts)
    }

    pub fn item(&self, item_id: i64, opts: &RequestOptions) -> Result<Item> {
        let vars = PathVars::new().var("item_id", item_id);
        self.get(&catalog::ITEM, vars, opts)
    }

    pub fn delete_item(&self, item_id: i64, opts: &RequestOptions) -> Result<()> {
        let vars = PathVars::new().var("item_id", item_id);
        self.remove(&catalog::DELETE_ITEM, vars, opts)
    }

    pub fn item_metadata(&self, item_id: i64, opts: &RequestOptions) -> Result<Vec<MetadataEntry>> {
        let vars = PathVars::new().var("item_id", item_id);
        self.get(&catalog::ITEM_METADATA, vars, opts)
    }

    /// Append metadata values to an item
    pub fn add_item_metadata(
        &self,
        item_id: i64,
        metadata: &[MetadataEntry],
        opts: &RequestOptions,
    ) -> Result<()> {
        let vars = PathVars::new().var("item_id", item_id);
        let entity = self.metadata_entity(metadata)?;
        self.do_request(&catalog::ADD_ITEM_METADATA, &vars, opts, entity)
            .map(|_| ())
    }

    /// Replace the values of the metadata fields present in `metadata`
    pub fn update_item_metadata(
        &self,
        item_id: i64,
        metadata: &[MetadataEntry],
        opts: &RequestOptions,
    ) -> Result<()> {
        let vars = PathVars::new().var("item_id", item_id);
        let entity = self.metadata_entity(metadata)?;
        self.do_request(&catalog::UPDATE_ITEM_METADATA, &vars, opts, entity)
            .map(|_| ())
    }

    /// Remove all metadata of an item
    pub fn delete_item_metadata(&self, item_id: i64, opts: &RequestOptions) -> Result<()> {
        let vars = PathVars::new().var("item_id", item_id);
        self.remove(&catalog::DELETE_ITEM_METADATA, vars, opts)
    }

    pub fn item_bitstreams(&self, item_id: i64, opts: &RequestOptions) -> Result<Vec<Bitstream>> {
        let vars = PathVars::new().var("item_id", item_id);
        self.get(&catalog::ITEM_BITSTREAMS, vars, opts)
    }

    /// Upload a new bitstream into an item. The stream is sent unmodified.
    pub fn add_item_bitstream(
        &self,
        item_id: i64,
        upload: &BitstreamUpload,
        data: UploadStream,
    ) -> Result<Bitstream> {
        let vars = PathVars::new().var("item_id", item_id);
        self.apply(&catalog::ADD_ITEM_BITSTREAM, &vars, upload, Entity::from(data))
    }

    pub fn delete_item_bitstream(
        &self,
        item_id: i64,
        bitstream_id: i64,
        opts: &RequestOptions,
    ) -> Result<()> {
        let vars = PathVars::new()
            .var("item_id", item_id)
            .var("bitstream_id", bitstream_id);
        self.remove(&catalog::DELETE_ITEM_BITSTREAM, vars, opts)
    }

    pub fn find_items_by_metadata_field(
        &self,
        entry: &MetadataEntry,
        opts: &RequestOptions,
    ) -> Result<Vec<Item>> {
        self.send(&catalog::FIND_ITEMS_BY_METADATA, PathVars::new(), opts, entry)
    }

    // Bitstreams

    pub fn bitstreams(&self, opts: &RequestOptions) -> Result<Vec<Bitstream>> {
        self.get(&catalog::BITSTREAMS, PathVars::new(), opts)
    }

    pub fn bitstream(&self, bitstream_id: i64, opts: &RequestOptions) -> Result<Bitstream> {
        let vars = PathVars::new().var("bitstream_id", bitstream_id);
        self.get(&catalog::BITSTREAM, vars, opts)
    }

    pub fn update_bitstream(
        &self,
        bitstream_id: i64,
        bitstream: &Bitstream,
        opts: &RequestOptions,
    ) -> Result<()> {
        let vars = PathVars::new().var("bitstream_id", bitstream_id);
        self.send_unit(&catalog::UPDATE_BITSTREAM, vars, opts, bitstream)
    }

    pub fn delete_bitstream(&self, bitstream_id: i64, opts: &RequestOptions) -> Result<()> {
        let vars = PathVars::new().var("bitstream_id", bitstream_id);
        self.remove(&catalog::DELETE_BITSTREAM, vars, opts)
    }

    /// Stored content of a bitstream, byte for byte
    pub fn bitstream_data(&self, bitstream_id: i64, opts: &RequestOptions) -> Result<Vec<u8>> {
        let vars = PathVars::new().var("bitstream_id", bitstream_id);
        let payload = self.do_request(&catalog::BITSTREAM_DATA, &vars, opts, Entity::Empty)?;
        Ok(payload.into_bytes())
    }

    /// Replace the stored content of a bitstream
    pub fn update_bitstream_data(
        &self,
        bitstream_id: i64,
        data: UploadStream,
        opts: &RequestOptions,
    ) -> Result<()> {
        let vars = PathVars::new().var("bitstream_id", bitstream_id);
        self.do_request(&catalog::UPDATE_BITSTREAM_DATA, &vars, opts, Entity::from(data))
            .map(|_| ())
    }

    pub fn bitstream_policies(&self, bitstream_id: i64) -> Result<Vec<ResourcePolicy>> {
        let vars = PathVars::new().var("bitstream_id", bitstream_id);
        self.apply(&catalog::BITSTREAM_POLICIES, &vars, &(), Entity::Empty)
    }

    pub fn add_bitstream_policy(
        &self,
        bitstream_id: i64,
        policy: &ResourcePolicy,
        opts: &RequestOptions,
    ) -> Result<()> {
        let vars = PathVars::new().var("bitstream_id", bitstream_id);
        self.send_unit(&catalog::ADD_BITSTREAM_POLICY, vars, opts, policy)
    }

    pub fn delete_bitstream_policy(
        &self,
        bitstream_id: i64,
        policy_id: i64,
        opts: &RequestOptions,
    ) -> Result<()> {
        let vars = PathVars::new()
            .var("bitstream_id", bitstream_id)
            .var("policy_id", policy_id);
        self.remove(&catalog::DELETE_BITSTREAM_POLICY, vars, opts)
    }
}
