//! Shared test transports.
//!
//! `FakeRepository` is a small in-memory DSpace server speaking the same
//! routes as the real one. `Scripted` replays canned responses in order.
//! Both record every request they receive.

#![allow(dead_code)]

use dspace_rest::codec::{self, MediaType};
use dspace_rest::transport::RequestBody;
use dspace_rest::{
    Bitstream, Collection, Community, Config, HttpRequest, HttpResponse, Item, Method, RestClient,
    RestError, Result, Status, Transport, User, TOKEN_HEADER,
};
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use url::Url;

pub const BASE_URL: &str = "http://dspace.test/rest";
pub const EMAIL: &str = "admin@dspace.test";
pub const PASSWORD: &str = "correct horse";

pub fn admin() -> User {
    User::new(EMAIL, PASSWORD)
}

/// A request as seen by a test transport, with the body drained
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    fn record(request: HttpRequest) -> Result<Self> {
        let body = match request.body {
            RequestBody::Empty => Vec::new(),
            RequestBody::Bytes(bytes) => bytes,
            RequestBody::Stream(stream) => stream.into_bytes()?,
        };
        Ok(RecordedRequest {
            method: request.method,
            url: request.url,
            headers: request.headers,
            body,
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url.query_pairs().into_owned().collect()
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub fn json_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        body: body.as_bytes().to_vec(),
    }
}

pub fn text_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
        body: body.as_bytes().to_vec(),
    }
}

pub fn empty_response(status: u16) -> HttpResponse {
    HttpResponse {
        status,
        headers: Vec::new(),
        body: Vec::new(),
    }
}

fn json<T: Serialize>(status: u16, value: &T) -> HttpResponse {
    HttpResponse {
        status,
        headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        body: serde_json::to_vec(value).unwrap(),
    }
}

// -----------------------------------------------------------------------------
// Scripted transport
// -----------------------------------------------------------------------------

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<HttpResponse>>,
    seen: Vec<RecordedRequest>,
}

/// Replays queued replies; answers `200` with an empty body once the queue
/// is exhausted.
#[derive(Clone, Default)]
pub struct Scripted {
    script: Arc<Mutex<Script>>,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, response: HttpResponse) -> &Self {
        self.script.lock().unwrap().replies.push_back(Ok(response));
        self
    }

    pub fn fail(&self, err: RestError) -> &Self {
        self.script.lock().unwrap().replies.push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script.lock().unwrap().seen.clone()
    }

    pub fn client(&self) -> RestClient {
        self.client_with(Config::new(BASE_URL).unwrap())
    }

    pub fn client_with(&self, config: Config) -> RestClient {
        RestClient::with_transport(config, self.clone())
    }
}

impl Transport for Scripted {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let recorded = RecordedRequest::record(request)?;
        let mut script = self.script.lock().unwrap();
        script.seen.push(recorded);
        script
            .replies
            .pop_front()
            .unwrap_or_else(|| Ok(empty_response(200)))
    }
}

// -----------------------------------------------------------------------------
// In-memory repository
// -----------------------------------------------------------------------------

#[derive(Default)]
struct Repository {
    next_id: i64,
    next_token: u64,
    /// token -> email
    sessions: HashMap<String, String>,
    communities: BTreeMap<i64, Community>,
    /// collection id -> (parent community, collection)
    collections: BTreeMap<i64, (i64, Collection)>,
    items: BTreeMap<i64, Item>,
    bitstreams: BTreeMap<i64, (Bitstream, Vec<u8>)>,
    fail_logout: bool,
    seen: Vec<RecordedRequest>,
}

impl Repository {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn find_handle(&self, handle: &str) -> Option<serde_json::Value> {
        let matches = |h: &Option<String>| h.as_deref() == Some(handle);
        if let Some(c) = self.communities.values().find(|c| matches(&c.handle)) {
            return serde_json::to_value(c).ok();
        }
        if let Some((_, c)) = self.collections.values().find(|(_, c)| matches(&c.handle)) {
            return serde_json::to_value(c).ok();
        }
        self.items
            .values()
            .find(|i| matches(&i.handle))
            .and_then(|i| serde_json::to_value(i).ok())
    }
}

/// In-memory DSpace server.
///
/// Reads are open to everyone; every write except `/login` needs a valid
/// session token. Bad credentials give `403`, logging out without a session
/// gives `400`, missing objects give `404`.
#[derive(Clone, Default)]
pub struct FakeRepository {
    state: Arc<Mutex<Repository>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(&self) -> RestClient {
        self.client_with(Config::new(BASE_URL).unwrap())
    }

    pub fn client_with(&self, config: Config) -> RestClient {
        RestClient::with_transport(config, self.clone())
    }

    /// Make every following logout answer `500`
    pub fn fail_logouts(&self, fail: bool) {
        self.state.lock().unwrap().fail_logout = fail;
    }

    pub fn active_sessions(&self) -> usize {
        self.state.lock().unwrap().sessions.len()
    }

    pub fn is_valid_token(&self, token: &str) -> bool {
        self.state.lock().unwrap().sessions.contains_key(token)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().seen.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().seen.clear();
    }
}

impl Transport for FakeRepository {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let recorded = RecordedRequest::record(request)?;
        let mut state = self.state.lock().unwrap();
        let response = route(&mut state, &recorded);
        state.seen.push(recorded);
        Ok(response)
    }
}

fn read<T: DeserializeOwned>(req: &RecordedRequest) -> Option<T> {
    let media = req
        .header("Content-Type")
        .and_then(MediaType::from_content_type)?;
    codec::decode(media, &req.body).ok()
}

fn segments(url: &Url) -> Vec<String> {
    url.path_segments()
        .map(|segments| {
            segments
                .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

fn route(state: &mut Repository, req: &RecordedRequest) -> HttpResponse {
    use Method::{Delete, Get, Post, Put};

    let owned = segments(&req.url);
    let all: Vec<&str> = owned.iter().map(String::as_str).collect();
    let path = match all.split_first() {
        Some((&"rest", rest)) => rest,
        _ => return text_response(404, "Not Found"),
    };

    let token = req.header(TOKEN_HEADER).map(str::to_string);
    let authenticated = token
        .as_deref()
        .map_or(false, |t| state.sessions.contains_key(t));

    match (req.method, path) {
        (Get, [""]) => HttpResponse {
            status: 200,
            headers: vec![("Content-Type".to_string(), "text/html".to_string())],
            body: b"<html><title>DSpace REST</title><body>Endpoints</body></html>".to_vec(),
        },
        (Get, ["test"]) => text_response(200, "REST api is running."),
        (Get, ["status"]) => {
            let email = token.as_deref().and_then(|t| state.sessions.get(t)).cloned();
            json(
                200,
                &Status {
                    okay: Some(true),
                    authenticated: Some(authenticated),
                    email,
                    fullname: None,
                    token: token.filter(|_| authenticated),
                },
            )
        }
        (Post, ["login"]) => match read::<User>(req) {
            Some(user) if user.email == EMAIL && user.password == PASSWORD => {
                state.next_token += 1;
                let issued = format!("token-{}", state.next_token);
                state.sessions.insert(issued.clone(), user.email);
                text_response(200, &issued)
            }
            Some(_) => empty_response(403),
            None => text_response(400, "unreadable credentials"),
        },
        (Post, ["logout"]) => {
            if !authenticated {
                return empty_response(400);
            }
            if state.fail_logout {
                return text_response(500, "logout failed");
            }
            if let Some(t) = token {
                state.sessions.remove(&t);
            }
            empty_response(200)
        }
        (Get, ["handle", prefix, suffix]) => {
            match state.find_handle(&format!("{}/{}", prefix, suffix)) {
                Some(value) => json(200, &value),
                None => text_response(404, "Not Found"),
            }
        }
        (method, _) if method != Get && !authenticated => text_response(401, "Unauthorized"),

        (Get, ["communities"]) => json(200, &state.communities.values().collect::<Vec<_>>()),
        (Post, ["communities"]) => match read::<Community>(req) {
            Some(mut community) => {
                let id = state.allocate();
                community.id = Some(id);
                community.handle = Some(format!("123456789/{}", id));
                community.kind = Some("community".to_string());
                state.communities.insert(id, community.clone());
                json(200, &community)
            }
            None => text_response(400, "unreadable community"),
        },
        (Get, ["communities", id]) => match id
            .parse()
            .ok()
            .and_then(|id: i64| state.communities.get(&id))
        {
            Some(community) => json(200, community),
            None => text_response(404, "Community not found"),
        },
        (Delete, ["communities", id]) => {
            let id: i64 = id.parse().unwrap_or(-1);
            if state.communities.remove(&id).is_none() {
                return text_response(404, "Community not found");
            }
            state.collections.retain(|_, (parent, _)| *parent != id);
            empty_response(200)
        }
        (Post, ["communities", id, "collections"]) => {
            let parent: i64 = id.parse().unwrap_or(-1);
            if !state.communities.contains_key(&parent) {
                return text_response(404, "Community not found");
            }
            match read::<Collection>(req) {
                Some(mut collection) => {
                    let id = state.allocate();
                    collection.id = Some(id);
                    collection.handle = Some(format!("123456789/{}", id));
                    collection.kind = Some("collection".to_string());
                    state.collections.insert(id, (parent, collection.clone()));
                    json(200, &collection)
                }
                None => text_response(400, "unreadable collection"),
            }
        }
        (Get, ["collections", id]) => match id
            .parse()
            .ok()
            .and_then(|id: i64| state.collections.get(&id))
        {
            Some((_, collection)) => json(200, collection),
            None => text_response(404, "Collection not found"),
        },
        (Put, ["collections", id]) => {
            let id: i64 = id.parse().unwrap_or(-1);
            let update = read::<Collection>(req);
            match (state.collections.get_mut(&id), update) {
                (Some((_, stored)), Some(update)) => {
                    stored.name = update.name.or(stored.name.take());
                    empty_response(200)
                }
                (None, _) => text_response(404, "Collection not found"),
                (_, None) => text_response(400, "unreadable collection"),
            }
        }
        (Delete, ["collections", id]) => {
            let id: i64 = id.parse().unwrap_or(-1);
            match state.collections.remove(&id) {
                Some(_) => empty_response(200),
                None => text_response(404, "Collection not found"),
            }
        }
        (Post, ["collections", id, "items"]) => {
            let parent: i64 = id.parse().unwrap_or(-1);
            if !state.collections.contains_key(&parent) {
                return text_response(404, "Collection not found");
            }
            match read::<Item>(req) {
                Some(mut item) => {
                    let id = state.allocate();
                    item.id = Some(id);
                    item.handle = Some(format!("123456789/{}", id));
                    item.kind = Some("item".to_string());
                    item.archived = Some("true".to_string());
                    // The name is only derived from dc.title once stored.
                    let created = Item {
                        name: None,
                        ..item.clone()
                    };
                    item.name = item.metadata_value("dc.title").map(str::to_string);
                    state.items.insert(id, item);
                    json(200, &created)
                }
                None => text_response(400, "unreadable item"),
            }
        }
        (Get, ["items", id]) => match id.parse().ok().and_then(|id: i64| state.items.get(&id)) {
            Some(item) => json(200, item),
            None => text_response(404, "Item not found"),
        },
        (Delete, ["items", id]) => {
            let id: i64 = id.parse().unwrap_or(-1);
            match state.items.remove(&id) {
                Some(_) => empty_response(200),
                None => text_response(404, "Item not found"),
            }
        }
        (Post, ["items", id, "bitstreams"]) => {
            let item_id: i64 = id.parse().unwrap_or(-1);
            if !state.items.contains_key(&item_id) {
                return text_response(404, "Item not found");
            }
            let query: HashMap<String, String> = req.url.query_pairs().into_owned().collect();
            let id = state.allocate();
            let bitstream = Bitstream {
                id: Some(id),
                name: query.get("name").cloned(),
                description: query.get("description").cloned(),
                kind: Some("bitstream".to_string()),
                bundle_name: Some("ORIGINAL".to_string()),
                mime_type: req.header("Content-Type").map(str::to_string),
                size_bytes: Some(req.body.len() as i64),
                retrieve_link: Some(format!("/bitstreams/{}/retrieve", id)),
                ..Default::default()
            };
            if let Some(item) = state.items.get_mut(&item_id) {
                item.bitstreams.push(bitstream.clone());
            }
            state.bitstreams.insert(id, (bitstream.clone(), req.body.clone()));
            json(200, &bitstream)
        }
        (Get, ["bitstreams", id]) => {
            match id.parse().ok().and_then(|id: i64| state.bitstreams.get(&id)) {
                Some((bitstream, _)) => json(200, bitstream),
                None => text_response(404, "Bitstream not found"),
            }
        }
        (Get, ["bitstreams", id, "retrieve"]) => {
            match id.parse().ok().and_then(|id: i64| state.bitstreams.get(&id)) {
                Some((bitstream, data)) => HttpResponse {
                    status: 200,
                    headers: vec![(
                        "Content-Type".to_string(),
                        bitstream
                            .mime_type
                            .clone()
                            .unwrap_or_else(|| "application/octet-stream".to_string()),
                    )],
                    body: data.clone(),
                },
                None => text_response(404, "Bitstream not found"),
            }
        }
        (Put, ["bitstreams", id, "data"]) => {
            let id: i64 = id.parse().unwrap_or(-1);
            match state.bitstreams.get_mut(&id) {
                Some((bitstream, data)) => {
                    *data = req.body.clone();
                    bitstream.size_bytes = Some(data.len() as i64);
                    empty_response(200)
                }
                None => text_response(404, "Bitstream not found"),
            }
        }
        (Delete, ["bitstreams", id]) => {
            let id: i64 = id.parse().unwrap_or(-1);
            match state.bitstreams.remove(&id) {
                Some(_) => empty_response(200),
                None => text_response(404, "Bitstream not found"),
            }
        }
        _ => text_response(404, "Not Found"),
    }
}
