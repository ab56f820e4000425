use std::collections::VecDeque;

use asset_revision::helpers::{
  BaseUrl, RevisionHeadLink, RevisionScript, ScriptItem, ScriptOptions, ScriptPlacement,
  StylesheetItem, StylesheetOptions,
};
use asset_revision::{AssetRevision, PackageGroup, PackageManifest, PackageResolver, RevisionRewriter};

fn service() -> AssetRevision {
  let styles = PackageGroup {
    file_name: Some("site.min.css".into()),
    input: Some(vec!["/css/reset.css".into(), "/css/site.css".into()]),
    attr: Some([("crossorigin".to_string(), "anonymous".to_string())].into_iter().collect()),
  };

  let scripts = PackageGroup {
    file_name: Some("app.min.js".into()),
    input: Some(vec!["/js/vendor.js".into(), "/js/app__1f.js".into()]),
    attr: Some([("defer".to_string(), "defer".to_string())].into_iter().collect()),
  };

  let manifest: PackageManifest = [
    ("styles".to_string(), styles),
    ("scripts".to_string(), scripts),
  ]
  .into_iter()
  .collect();

  AssetRevision::from_parts(
    PackageResolver::new(manifest, None, false),
    RevisionRewriter::new("7"),
  )
}

fn relative() -> StylesheetOptions {
  StylesheetOptions {
    absolute: false,
    ..StylesheetOptions::default()
  }
}

#[test]
fn head_link_appends_revised_package_files() {
  let service = service();
  let urls = BaseUrl::new();
  let mut links: Vec<StylesheetItem> = Vec::new();

  RevisionHeadLink::new(&service, &urls, &mut links).append_package("styles", &relative());

  let hrefs: Vec<&str> = links.iter().map(|item| item.href.as_str()).collect();
  assert_eq!(hrefs, vec!["/css/reset__7.css", "/css/site__7.css"]);
  assert!(links.iter().all(|item| item.media == "screen"));
  assert_eq!(
    links[0].extras.get("crossorigin").map(String::as_str),
    Some("anonymous")
  );
}

#[test]
fn head_link_prepend_keeps_package_order_at_head() {
  let service = service();
  let urls = BaseUrl::new();
  let mut links = VecDeque::from([StylesheetItem {
    href: "/css/existing.css".into(),
    media: "screen".into(),
    conditional: None,
    extras: Default::default(),
  }]);

  RevisionHeadLink::new(&service, &urls, &mut links).prepend_package("styles", &relative());

  let hrefs: Vec<&str> = links.iter().map(|item| item.href.as_str()).collect();
  assert_eq!(hrefs, vec!["/css/reset__7.css", "/css/site__7.css", "/css/existing.css"]);
}

#[test]
fn head_link_single_stylesheet_drops_rel_and_qualifies_url() {
  let service = service();
  let urls = BaseUrl::from_request("https://shop.example.com/cart?step=2");
  let mut links: Vec<StylesheetItem> = Vec::new();
  let mut options = StylesheetOptions::default();
  options.extras.insert("rel".into(), "alternate".into());
  options.path_prefix = "/static".into();

  let mut helper = RevisionHeadLink::new(&service, &urls, &mut links);
  helper
    .append_stylesheet("/css/print.css", &options, true)
    .append_stylesheet("/css/raw.css", &options, false);

  assert_eq!(links[0].href, "https://shop.example.com/static/css/print__7.css");
  assert_eq!(links[1].href, "https://shop.example.com/static/css/raw.css");
  assert!(links.iter().all(|item| !item.extras.contains_key("rel")));
}

#[test]
fn head_link_unknown_package_adds_nothing() {
  let service = service();
  let urls = BaseUrl::new();
  let mut links: Vec<StylesheetItem> = Vec::new();

  let helper = RevisionHeadLink::new(&service, &urls, &mut links);
  assert!(helper.list_package("missing", &relative()).is_empty());
}

#[test]
fn package_urls_keep_request_query_unless_cleared() {
  let service = service();
  let urls = BaseUrl::from_request("https://shop.example.com/cart?step=2");
  let mut links: Vec<StylesheetItem> = Vec::new();
  let helper = RevisionHeadLink::new(&service, &urls, &mut links);

  let kept = helper.list_package("styles", &relative());
  assert_eq!(kept[0].href, "/css/reset__7.css?step=2");

  let cleared = helper.list_package("styles", &StylesheetOptions {
    clear_query: true,
    ..relative()
  });
  assert_eq!(cleared[0].href, "/css/reset__7.css");
}

#[test]
fn head_script_merges_attributes_and_skips_stamped_files() {
  let service = service();
  let urls = BaseUrl::new();
  let mut scripts: Vec<ScriptItem> = Vec::new();
  let mut options = ScriptOptions {
    absolute: false,
    ..ScriptOptions::default()
  };
  options.attrs.insert("async".into(), "async".into());

  RevisionScript::head(&service, &urls, &mut scripts).append_package("scripts", &options);

  let sources: Vec<&str> = scripts.iter().map(|item| item.src.as_str()).collect();
  assert_eq!(sources, vec!["/js/vendor__7.js", "/js/app__1f.js"]);
  for item in &scripts {
    assert_eq!(item.script_type, "text/javascript");
    assert_eq!(item.placement, ScriptPlacement::Head);
    assert_eq!(item.attributes.get("defer").map(String::as_str), Some("defer"));
    assert_eq!(item.attributes.get("async").map(String::as_str), Some("async"));
  }
}

#[test]
fn inline_script_prepends_files() {
  let service = service();
  let urls = BaseUrl::new();
  let mut scripts: Vec<ScriptItem> = Vec::new();
  let options = ScriptOptions {
    absolute: false,
    ..ScriptOptions::default()
  };

  let mut helper = RevisionScript::inline(&service, &urls, &mut scripts);
  helper
    .append_file("/js/late.js", &options, true)
    .prepend_package("scripts", &options)
    .prepend_file("/js/first.js", &options, false);

  let sources: Vec<&str> = scripts.iter().map(|item| item.src.as_str()).collect();
  assert_eq!(sources, vec![
    "/js/first.js",
    "/js/vendor__7.js",
    "/js/app__1f.js",
    "/js/late__7.js",
  ]);
  assert!(scripts.iter().all(|item| item.placement == ScriptPlacement::Inline));
}

#[test]
fn list_package_does_not_modify_script_list() {
  let service = service();
  let urls = BaseUrl::new();
  let mut scripts: Vec<ScriptItem> = Vec::new();

  let listed = RevisionScript::head(&service, &urls, &mut scripts)
    .list_package("scripts", &ScriptOptions::default());
  assert_eq!(listed.len(), 2);
  assert!(scripts.is_empty());
}
