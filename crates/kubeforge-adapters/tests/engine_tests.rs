//! Scaffold executor behaviour against the in-memory filesystem.

use std::path::Path;

use kubeforge_adapters::{MemoryFilesystem, SimpleRenderer};
use kubeforge_core::{
    application::{ApplicationError, FileAction, Scaffold},
    domain::{
        Builder, CommentSyntaxRegistry, Creator, Feature, FeatureSet, IfExistsAction, Inserter,
        Marker, Resource, ScaffoldSession,
    },
    error::ForgeError,
};

const ROOT: &str = "/work";

fn session() -> ScaffoldSession {
    ScaffoldSession::new("frigate-operator")
        .unwrap()
        .with_owner("Acme")
        .with_year(2024)
        .with_resource(Resource::new("ship", "v1", "Frigate"))
}

fn run(fs: &MemoryFilesystem, builders: &[Builder]) -> Vec<Result<FileAction, ForgeError>> {
    let renderer = SimpleRenderer::new();
    Scaffold::new(fs, &renderer, ROOT)
        .execute(&session(), builders)
        .outcomes()
        .iter()
        .map(|o| o.result.clone())
        .collect()
}

fn marker(value: &str) -> Marker {
    Marker::new(&CommentSyntaxRegistry::default(), "src/main.rs", value).unwrap()
}

fn text(path: &str, action: IfExistsAction, body: &str) -> Builder {
    Creator::new("text", path, body).if_exists(action).into()
}

#[test]
fn create_skip_overwrite_scenario() {
    let fs = MemoryFilesystem::new();

    let first = run(&fs, &[text("a.txt", IfExistsAction::Skip, "hello")]);
    assert!(matches!(first[0], Ok(FileAction::Created)));
    assert_eq!(fs.content("/work/a.txt").as_deref(), Some("hello"));

    let second = run(&fs, &[text("a.txt", IfExistsAction::Skip, "hello")]);
    assert!(matches!(second[0], Ok(FileAction::Skipped)));
    assert_eq!(fs.content("/work/a.txt").as_deref(), Some("hello"));

    let third = run(&fs, &[text("a.txt", IfExistsAction::Overwrite, "world")]);
    assert!(matches!(third[0], Ok(FileAction::Overwritten)));
    assert_eq!(fs.content("/work/a.txt").as_deref(), Some("world"));
}

#[test]
fn creator_policy_matrix() {
    let cases = [
        (false, IfExistsAction::Skip, Some(FileAction::Created), "new"),
        (false, IfExistsAction::Error, Some(FileAction::Created), "new"),
        (false, IfExistsAction::Overwrite, Some(FileAction::Created), "new"),
        (true, IfExistsAction::Skip, Some(FileAction::Skipped), "old"),
        (true, IfExistsAction::Error, None, "old"),
        (true, IfExistsAction::Overwrite, Some(FileAction::Overwritten), "new"),
    ];

    for (present, policy, expected, content) in cases {
        let fs = if present {
            MemoryFilesystem::new().with_file("/work/f.txt", "old")
        } else {
            MemoryFilesystem::new()
        };

        let results = run(&fs, &[text("f.txt", policy, "new")]);
        match (expected, &results[0]) {
            (Some(action), Ok(got)) => assert_eq!(*got, action, "{present} {policy}"),
            (None, Err(ForgeError::Application(ApplicationError::FileAlreadyExists { path }))) => {
                assert_eq!(path, Path::new("/work/f.txt"));
            }
            (_, other) => panic!("{present} {policy}: unexpected {other:?}"),
        }
        assert_eq!(fs.content("/work/f.txt").as_deref(), Some(content), "{present} {policy}");
    }
}

#[test]
fn error_policy_does_not_stop_independent_builders() {
    let fs = MemoryFilesystem::new().with_file("/work/taken.txt", "mine");

    let results = run(
        &fs,
        &[
            text("taken.txt", IfExistsAction::Error, "theirs"),
            text("free.txt", IfExistsAction::Error, "theirs"),
        ],
    );

    assert!(results[0].is_err());
    assert!(matches!(results[1], Ok(FileAction::Created)));
    assert_eq!(fs.content("/work/taken.txt").as_deref(), Some("mine"));
    assert_eq!(fs.content("/work/free.txt").as_deref(), Some("theirs"));
}

#[test]
fn inserter_creates_skeleton_then_anchors_fragments() {
    let fs = MemoryFilesystem::new();
    let inserter: Builder = Inserter::new("main", "src/main.rs")
        .rule(marker("imports"), Feature::Resource, |r| {
            format!("use crate::api::{}_types::{};", r.kind_lower(), r.kind)
        })
        .features(FeatureSet::new().with(Feature::Resource))
        .into();

    let created = run(&fs, std::slice::from_ref(&inserter));
    assert!(matches!(created[0], Ok(FileAction::Created)));
    assert_eq!(
        fs.content("/work/src/main.rs").as_deref(),
        Some("// +kubebuilder:scaffold:imports\n")
    );

    let updated = run(&fs, std::slice::from_ref(&inserter));
    assert!(matches!(updated[0], Ok(FileAction::Updated)));
    assert_eq!(
        fs.content("/work/src/main.rs").as_deref(),
        Some("use crate::api::frigate_types::Frigate;\n// +kubebuilder:scaffold:imports\n")
    );

    let again = run(&fs, &[inserter]);
    assert!(matches!(again[0], Ok(FileAction::Unchanged)));
}

#[test]
fn fragment_order_follows_feature_declaration() {
    let fs = MemoryFilesystem::new().with_file("/work/src/main.rs", "// +kubebuilder:scaffold:imports\n");

    let mut features = FeatureSet::new();
    features.set(Feature::Controller, true);
    features.set(Feature::Resource, true);

    let inserter: Builder = Inserter::new("main", "src/main.rs")
        .rule(marker("imports"), Feature::Controller, |_| "// controller".into())
        .rule(marker("imports"), Feature::Resource, |_| "// resource".into())
        .features(features)
        .into();

    run(&fs, &[inserter]);
    assert_eq!(
        fs.content("/work/src/main.rs").as_deref(),
        Some("// resource\n// controller\n// +kubebuilder:scaffold:imports\n")
    );
}

#[test]
fn later_builders_see_earlier_writes() {
    let fs = MemoryFilesystem::new();
    let body = format!("fn main() {{}}\n{}\n", marker("imports"));

    let results = run(
        &fs,
        &[
            Creator::new("main", "src/main.rs", body).into(),
            Inserter::new("imports", "src/main.rs")
                .rule(marker("imports"), Feature::Resource, |_| "mod api;".into())
                .features(FeatureSet::new().with(Feature::Resource))
                .into(),
        ],
    );

    assert!(matches!(results[1], Ok(FileAction::Updated)));
    assert_eq!(
        fs.content("/work/src/main.rs").as_deref(),
        Some("fn main() {}\nmod api;\n// +kubebuilder:scaffold:imports\n")
    );
}

#[test]
fn undefined_variable_fails_only_that_builder() {
    let fs = MemoryFilesystem::new();
    let results = run(
        &fs,
        &[
            Creator::new("bad", "bad.txt", "{{UNDEFINED}}").into(),
            Creator::new("good", "good.txt", "{{KIND}}").into(),
        ],
    );

    assert!(matches!(
        &results[0],
        Err(ForgeError::Domain(kubeforge_core::domain::DomainError::TemplateRender { variable, .. }))
            if variable == "UNDEFINED"
    ));
    assert_eq!(fs.content("/work/good.txt").as_deref(), Some("Frigate"));
    assert!(fs.content("/work/bad.txt").is_none());
}

#[test]
fn rerunning_the_same_builders_changes_nothing() {
    let fs = MemoryFilesystem::new();
    let main_body = format!("{}\nfn main() {{\n    {}\n}}\n", marker("imports"), marker("runners"));
    let builders: Vec<Builder> = vec![
        text("src/main.rs", IfExistsAction::Skip, &main_body),
        text("src/api/{{KIND_LOWER}}_types.rs", IfExistsAction::Skip, "pub struct {{KIND}};\n"),
        Inserter::new("main", "src/main.rs")
            .rule(marker("imports"), Feature::Resource, |r| {
                format!("use crate::api::{}_types::{};", r.kind_lower(), r.kind)
            })
            .rule(marker("runners"), Feature::Controller, |r| {
                format!("{}::run();", r.kind_lower())
            })
            .features(FeatureSet::new().with(Feature::Resource).with(Feature::Controller))
            .into(),
    ];

    let first = run(&fs, &builders);
    assert!(matches!(first[0], Ok(FileAction::Created)));
    assert!(matches!(first[1], Ok(FileAction::Created)));
    assert!(matches!(first[2], Ok(FileAction::Updated)));
    let after_first = fs.snapshot();

    let second = run(&fs, &builders);
    assert!(matches!(second[0], Ok(FileAction::Skipped)));
    assert!(matches!(second[1], Ok(FileAction::Skipped)));
    assert!(matches!(second[2], Ok(FileAction::Unchanged)));
    assert_eq!(fs.snapshot(), after_first);

    assert_eq!(
        fs.content("/work/src/main.rs").as_deref(),
        Some(
            "use crate::api::frigate_types::Frigate;\n// +kubebuilder:scaffold:imports\nfn main() {\n    frigate::run();\n    // +kubebuilder:scaffold:runners\n}\n"
        )
    );
}
