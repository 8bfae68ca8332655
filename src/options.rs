use crate::template::QueryArgs;

/// Optional query parameters shared by most DSpace endpoints.
///
/// Every field left as `None` is omitted from the request. Each endpoint only
/// sends the parameters it declares in the catalog; the others are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Comma separated list of sub-objects to expand, e.g. "metadata,bitstreams" or "all"
    pub expand: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Address of the end user on whose behalf the call is made
    pub user_ip: Option<String>,
    pub user_agent: Option<String>,
    pub xforwarded_for: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn user_ip(mut self, user_ip: impl Into<String>) -> Self {
        self.user_ip = Some(user_ip.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn xforwarded_for(mut self, xforwarded_for: impl Into<String>) -> Self {
        self.xforwarded_for = Some(xforwarded_for.into());
        self
    }
}

impl QueryArgs for RequestOptions {
    fn query_value(&self, name: &str) -> Option<String> {
        match name {
            "expand" => self.expand.clone(),
            "limit" => self.limit.map(|v| v.to_string()),
            "offset" => self.offset.map(|v| v.to_string()),
            "userIP" => self.user_ip.clone(),
            "userAgent" => self.user_agent.clone(),
            "xforwardedfor" => self.xforwarded_for.clone(),
            _ => None,
        }
    }
}
