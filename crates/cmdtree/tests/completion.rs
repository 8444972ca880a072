use cmdtree::{CommandSpec, Invocation, Router};

fn router(paths: &[&str]) -> Router {
    let mut router = Router::new();
    router
        .register_all(
            paths
                .iter()
                .map(|p| CommandSpec::new(p, |_: &Invocation<'_>| {})),
        )
        .unwrap();
    router
}

fn long_router() -> Router {
    router(&[
        "this one is really pretty long",
        "this one is really pretty different",
        "say hi",
        "say bye",
        "sayone",
    ])
}

#[test]
fn test_tab_completion() {
    let r = long_router();
    assert_eq!(
        r.complete("this", &["one", "is", "really", "pretty"]),
        vec!["different", "long"]
    );
}

#[test]
fn test_tab_completion_partial() {
    let r = long_router();
    assert_eq!(
        r.complete("this", &["one", "is", "really", "pretty", "di"]),
        vec!["different"]
    );
}

#[test]
fn test_completion_after_name_only() {
    let r = long_router();
    assert_eq!(r.complete::<&str>("say", &[]), vec!["bye", "hi"]);
}

#[test]
fn test_completion_empty_partial_matches_all() {
    let r = long_router();
    assert_eq!(r.complete("say", &[""]), vec!["bye", "hi"]);
}

#[test]
fn test_completion_is_case_sensitive() {
    let r = long_router();
    assert!(r.complete("say", &["H"]).is_empty());
}

#[test]
fn test_completion_gives_up_after_unmatched_token() {
    let r = long_router();
    assert!(r.complete("this", &["two", "is"]).is_empty());
}

#[test]
fn test_completion_at_leaf_without_children() {
    let r = long_router();
    assert!(r.complete::<&str>("sayone", &[]).is_empty());
    assert!(r.complete("sayone", &["x"]).is_empty());
}

#[test]
fn test_completion_unknown_name() {
    let r = long_router();
    assert!(r.complete("nothing", &["here"]).is_empty());
}
