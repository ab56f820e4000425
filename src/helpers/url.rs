//! URL building for asset references: base URLs relative to the current request and the
//! absolute/prefixed form handed to the element lists.

use std::fmt;
use std::sync::OnceLock;

use regex::{Captures, Regex};

fn absolute_url() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r"^(?P<scheme>[A-Za-z][A-Za-z0-9+.\-]*)://(?P<authority>[^/?#]*)(?P<rest>.*)$")
      .expect("invalid absolute url regex")
  })
}

fn absolute_parts(url: &str) -> Option<Captures<'_>> {
  absolute_url().captures(url)
}

/// Builds URLs for resources served by the host application.
pub trait UrlBuilder {
  /// URL for a resource path, optionally with scheme and host, optionally without the
  /// current request's query string.
  fn base_url(&self, resource: &str, with_host: bool, clear_query: bool) -> String;
  /// Fully qualified URL for a path on the current server.
  fn server_url(&self, path: &str) -> String;
}

/// Scheme, host and port of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
  /// URL scheme such as `https`.
  pub scheme: String,
  /// Host name without port.
  pub host: String,
  /// Explicit port, omitted from the output when it is the scheme's default.
  pub port: Option<u16>,
}

impl Origin {
  /// Create an origin from its parts.
  pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: Option<u16>) -> Self {
    Self {
      scheme: scheme.into(),
      host: host.into(),
      port,
    }
  }

  /// Extract the origin from an absolute URL.
  pub fn parse(url: &str) -> Option<Self> {
    let caps = absolute_parts(url)?;
    let authority = caps.name("authority")?.as_str();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    if host_port.is_empty() {
      return None;
    }

    let (host, port) = match host_port.rsplit_once(':') {
      Some((host, port)) => match port.parse::<u16>() {
        Ok(port) => (host, Some(port)),
        Err(_) => (host_port, None),
      },
      None => (host_port, None),
    };

    Some(Self::new(&caps["scheme"], host, port))
  }

  fn default_port(&self) -> Option<u16> {
    match self.scheme.to_ascii_lowercase().as_str() {
      "http" => Some(80),
      "https" => Some(443),
      _ => None,
    }
  }
}

impl fmt::Display for Origin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}://{}", self.scheme, self.host)?;
    match self.port {
      Some(port) if Some(port) != self.default_port() => write!(f, ":{port}"),
      _ => Ok(()),
    }
  }
}

/// [`UrlBuilder`] backed by the URL of the request being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseUrl {
  origin: Option<Origin>,
  query: Option<String>,
}

impl BaseUrl {
  /// Builder without request information; resources are returned as given.
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder for the given request URL, keeping its origin and query string.
  pub fn from_request(url: &str) -> Self {
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
    let query = without_fragment
      .split_once('?')
      .map(|(_, query)| query.to_string())
      .filter(|query| !query.is_empty());

    Self {
      origin: Origin::parse(url),
      query,
    }
  }

  /// Replace the request origin.
  pub fn with_origin(mut self, origin: Origin) -> Self {
    self.origin = Some(origin);
    self
  }

  /// Replace the request query string.
  pub fn with_query(mut self, query: impl Into<String>) -> Self {
    self.query = Some(query.into()).filter(|query| !query.is_empty());
    self
  }

  /// Origin of the current request, if known.
  pub fn origin(&self) -> Option<&Origin> {
    self.origin.as_ref()
  }
}

impl UrlBuilder for BaseUrl {
  fn base_url(&self, resource: &str, with_host: bool, clear_query: bool) -> String {
    let mut url = String::new();
    if with_host && let Some(origin) = &self.origin {
      url.push_str(&origin.to_string());
    }
    url.push_str(resource);

    if !clear_query && let Some(query) = &self.query {
      url.push('?');
      url.push_str(query);
    }

    url
  }

  fn server_url(&self, path: &str) -> String {
    match &self.origin {
      Some(origin) => format!("{origin}{path}"),
      None => path.to_string(),
    }
  }
}

/// Final URL for an element list entry.
///
/// With `absolute`, relative references are qualified through [`UrlBuilder::server_url`];
/// without it, absolute URLs lose their scheme and authority. The prefix is always inserted
/// in front of the path.
pub fn get_url<U: UrlBuilder + ?Sized>(
  urls: &U,
  src: &str,
  absolute: bool,
  path_prefix: &str,
) -> String {
  match (absolute_parts(src), absolute) {
    (Some(caps), true) => format!(
      "{}://{}{path_prefix}{}",
      &caps["scheme"], &caps["authority"], &caps["rest"]
    ),
    (Some(caps), false) => format!("{path_prefix}{}", &caps["rest"]),
    (None, true) => urls.server_url(&format!("{path_prefix}{src}")),
    (None, false) => format!("{path_prefix}{src}"),
  }
}
