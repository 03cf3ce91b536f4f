use super::*;
use crate::test_support::{RecordingArchiver, sample_project};
use std::thread::sleep;
use std::time::Duration;
use tempfile::TempDir;

const ENTRY: &str = "META-INF/maven/org.example/app/pom.properties";

fn target_in(dir: &TempDir) -> PathBuf {
    dir.path().join("target").join(DESCRIPTOR_DIR).join(DESCRIPTOR_FILE_NAME)
}

#[test]
fn test_entry_paths() {
    assert_eq!(pom_properties_entry("org.example", "app"), ENTRY);
    assert_eq!(
        pom_xml_entry("org.example", "app"),
        "META-INF/maven/org.example/app/pom.xml"
    );
}

#[test]
fn test_default_descriptor_path() {
    let mut project = sample_project();
    project.build_directory = PathBuf::from("/work/build");
    assert_eq!(
        default_descriptor_path(&project),
        Path::new("/work/build/maven-archiver/pom.properties")
    );
}

#[test]
fn test_generates_descriptor() {
    let temp_dir = TempDir::new().unwrap();
    let target = target_in(&temp_dir);
    let mut archiver = RecordingArchiver::default();

    let path = ensure_descriptor(&sample_project(), &mut archiver, &target, None, false).unwrap();

    assert_eq!(path, target);
    let text = fs::read_to_string(&target).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("#Generated by Maven"));
    assert!(lines.next().unwrap().starts_with('#'));
    assert_eq!(
        lines.collect::<Vec<_>>(),
        vec!["groupId=org.example", "artifactId=app", "version=1.0"]
    );
    assert_eq!(archiver.entry(ENTRY), Some(&target));
}

#[test]
fn test_unchanged_descriptor_not_rewritten() {
    let temp_dir = TempDir::new().unwrap();
    let target = target_in(&temp_dir);
    let project = sample_project();

    ensure_descriptor(&project, &mut RecordingArchiver::default(), &target, None, false).unwrap();
    let first = fs::read_to_string(&target).unwrap();
    let modified = fs::metadata(&target).unwrap().modified().unwrap();

    // Date header has one-second resolution.
    sleep(Duration::from_millis(1100));

    let mut archiver = RecordingArchiver::default();
    ensure_descriptor(&project, &mut archiver, &target, None, false).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), first);
    assert_eq!(fs::metadata(&target).unwrap().modified().unwrap(), modified);
    assert_eq!(archiver.entry(ENTRY), Some(&target));
}

#[test]
fn test_forced_descriptor_always_rewritten() {
    let temp_dir = TempDir::new().unwrap();
    let target = target_in(&temp_dir);
    let project = sample_project();

    ensure_descriptor(&project, &mut RecordingArchiver::default(), &target, None, true).unwrap();
    let first = fs::read_to_string(&target).unwrap();
    sleep(Duration::from_millis(1100));
    ensure_descriptor(&project, &mut RecordingArchiver::default(), &target, None, true).unwrap();

    assert_ne!(fs::read_to_string(&target).unwrap(), first);
}

#[test]
fn test_changed_version_rewrites() {
    let temp_dir = TempDir::new().unwrap();
    let target = target_in(&temp_dir);
    let mut project = sample_project();

    ensure_descriptor(&project, &mut RecordingArchiver::default(), &target, None, false).unwrap();
    project.version = "1.1".to_string();
    ensure_descriptor(&project, &mut RecordingArchiver::default(), &target, None, false).unwrap();

    let written = Properties::load(&target).unwrap();
    assert_eq!(written.get("version"), Some("1.1"));
}

#[test]
fn test_extra_keys_count_as_different() {
    let temp_dir = TempDir::new().unwrap();
    let target = target_in(&temp_dir);
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(
        &target,
        "groupId=org.example\nartifactId=app\nversion=1.0\nextra=x\n",
    )
    .unwrap();

    ensure_descriptor(&sample_project(), &mut RecordingArchiver::default(), &target, None, false)
        .unwrap();

    let written = Properties::load(&target).unwrap();
    assert_eq!(written.len(), 3);
    assert_eq!(written.get("extra"), None);
}

#[test]
fn test_malformed_existing_descriptor_replaced() {
    let temp_dir = TempDir::new().unwrap();
    let target = target_in(&temp_dir);
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(&target, "groupId=\\uZZZZ\n").unwrap();

    ensure_descriptor(&sample_project(), &mut RecordingArchiver::default(), &target, None, false)
        .unwrap();

    assert_eq!(
        Properties::load(&target).unwrap().get("groupId"),
        Some("org.example")
    );
}

#[test]
fn test_blank_user_path_means_generated() {
    let temp_dir = TempDir::new().unwrap();
    let target = target_in(&temp_dir);
    let mut archiver = RecordingArchiver::default();

    let path = ensure_descriptor(
        &sample_project(),
        &mut archiver,
        &target,
        Some(Path::new("  ")),
        false,
    )
    .unwrap();

    assert_eq!(path, target);
    assert!(target.is_file());
}

#[test]
fn test_user_descriptor_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("custom.properties");

    let err = ensure_descriptor(
        &sample_project(),
        &mut RecordingArchiver::default(),
        &target_in(&temp_dir),
        Some(&missing),
        false,
    )
    .unwrap_err();

    assert!(matches!(err, ArchiverError::NotFound(p) if p == missing));
}

#[test]
fn test_user_descriptor_not_a_file() {
    let temp_dir = TempDir::new().unwrap();

    let err = ensure_descriptor(
        &sample_project(),
        &mut RecordingArchiver::default(),
        &target_in(&temp_dir),
        Some(temp_dir.path()),
        false,
    )
    .unwrap_err();

    assert!(matches!(err, ArchiverError::NotAFile(_)));
}

#[test]
fn test_user_descriptor_updated_and_other_keys_kept() {
    let temp_dir = TempDir::new().unwrap();
    let user = temp_dir.path().join("custom.properties");
    fs::write(&user, "build.number=42\ngroupId=old.group\n").unwrap();
    let mut archiver = RecordingArchiver::default();

    let path = ensure_descriptor(
        &sample_project(),
        &mut archiver,
        &target_in(&temp_dir),
        Some(&user),
        false,
    )
    .unwrap();

    assert_eq!(path, user);
    let written = Properties::load(&user).unwrap();
    assert_eq!(written.get("build.number"), Some("42"));
    assert_eq!(written.get("groupId"), Some("org.example"));
    assert_eq!(written.get("artifactId"), Some("app"));
    assert_eq!(written.get("version"), Some("1.0"));
    assert_eq!(archiver.entry(ENTRY), Some(&user));
    assert!(!target_in(&temp_dir).exists());
}

#[test]
fn test_user_descriptor_latin1_extra_key_kept() {
    let temp_dir = TempDir::new().unwrap();
    let user = temp_dir.path().join("custom.properties");
    fs::write(
        &user,
        b"groupId=org.example\nartifactId=app\nversion=0.9\nname=Caf\xe9\n",
    )
    .unwrap();
    let mut archiver = RecordingArchiver::default();

    let path = ensure_descriptor(
        &sample_project(),
        &mut archiver,
        &target_in(&temp_dir),
        Some(&user),
        false,
    )
    .unwrap();

    assert_eq!(path, user);
    let written = Properties::load(&user).unwrap();
    assert_eq!(written.get("name"), Some("Caf\u{e9}"));
    assert_eq!(written.get("version"), Some("1.0"));
    assert!(fs::read_to_string(&user).unwrap().contains("name=Caf\\u00E9\n"));
    assert_eq!(archiver.entry(ENTRY), Some(&user));
}

#[test]
fn test_user_descriptor_with_matching_coordinates_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let user = temp_dir.path().join("custom.properties");
    let content = "# hand written\ngroupId = org.example\nartifactId = app\nversion = 1.0\n";
    fs::write(&user, content).unwrap();
    let mut archiver = RecordingArchiver::default();

    ensure_descriptor(
        &sample_project(),
        &mut archiver,
        &target_in(&temp_dir),
        Some(&user),
        true,
    )
    .unwrap();

    assert_eq!(fs::read_to_string(&user).unwrap(), content);
    assert_eq!(archiver.entry(ENTRY), Some(&user));
}
