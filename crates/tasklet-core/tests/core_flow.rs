use std::ffi::OsString;
use std::fs;
use std::path::Path;

use tasklet_core::config::Config;
use tasklet_core::datastore::FileStore;
use tasklet_core::render::Renderer;
use tasklet_core::run;
use tasklet_shared::{
    KeyValueStore, ListController, CannedPrompter, TASKS_KEY, THEME_KEY, Theme,
};
use tempfile::tempdir;

fn tasklet(dir: &Path, args: &[&str]) -> anyhow::Result<()> {
    let rc = dir.join("taskletrc");
    if !rc.exists() {
        fs::write(&rc, "color = off\n").expect("write rc");
    }

    let mut raw: Vec<OsString> = vec![
        "tasklet".into(),
        "--taskletrc".into(),
        rc.into(),
        "--data".into(),
        dir.join("data").into(),
    ];
    raw.extend(args.iter().map(OsString::from));
    run(raw)
}

fn stored_value(dir: &Path, key: &str) -> Option<String> {
    FileStore::open(&dir.join("data"))
        .expect("open store")
        .get(key)
        .expect("read store")
}

fn texts<S: KeyValueStore>(controller: &ListController<S>) -> Vec<String> {
    controller.tasks().iter().map(str::to_string).collect()
}

#[test]
fn file_store_survives_restart() {
    let temp = tempdir().expect("tempdir");

    let store = FileStore::open(temp.path()).expect("open store");
    let mut controller = ListController::load(store);
    for text in ["a", "b", "c"] {
        controller.add(text).expect("add task");
    }
    controller.toggle_theme().expect("toggle theme");
    drop(controller);

    let store = FileStore::open(temp.path()).expect("reopen store");
    assert_eq!(
        store.get(TASKS_KEY).expect("read tasks").as_deref(),
        Some(r#"["a","b","c"]"#)
    );
    assert_eq!(
        store.get(THEME_KEY).expect("read theme").as_deref(),
        Some("dark")
    );

    let mut controller = ListController::load(store);
    assert_eq!(texts(&controller), vec!["a", "b", "c"]);
    assert_eq!(controller.theme(), Theme::Dark);

    let mut prompter = CannedPrompter::new()
        .confirming(true)
        .answering(Some("B2"));
    controller.delete(2, &mut prompter).expect("delete");
    controller.edit(1, &mut prompter).expect("edit");

    let reopened = FileStore::open(temp.path()).expect("reopen store");
    assert_eq!(
        texts(&ListController::load(reopened)),
        vec!["a", "B2"]
    );
}

#[test]
fn corrupt_task_value_loads_empty() {
    let temp = tempdir().expect("tempdir");
    let mut store = FileStore::open(temp.path()).expect("open store");
    store.set(TASKS_KEY, "[not json").expect("seed bad value");
    store.set(THEME_KEY, "purple").expect("seed theme");

    let controller = ListController::load(store);
    assert!(controller.tasks().is_empty());
    assert_eq!(controller.theme(), Theme::Light);
}

#[test]
fn corrupt_store_file_is_treated_as_absent_on_load() {
    let temp = tempdir().expect("tempdir");
    let store = FileStore::open(temp.path()).expect("open store");
    fs::write(&store.store_path, "garbage").expect("corrupt store file");

    assert!(store.get(TASKS_KEY).is_err());
    let controller = ListController::load(store);
    assert!(controller.tasks().is_empty());
}

#[test]
fn config_reads_rc_file_with_include_and_overrides() {
    let temp = tempdir().expect("tempdir");
    let extra = temp.path().join("extra.rc");
    fs::write(&extra, "color = off\n").expect("write include");
    let rc = temp.path().join("taskletrc");
    fs::write(
        &rc,
        "# tasklet settings\ndata.location = /tmp/tasklet-test # inline\ninclude extra.rc\n",
    )
    .expect("write rc");

    let mut cfg = Config::load(Some(&rc)).expect("load config");
    assert_eq!(cfg.get("data.location").as_deref(), Some("/tmp/tasklet-test"));
    assert_eq!(cfg.get_bool("color"), Some(false));
    assert_eq!(cfg.get("default.command").as_deref(), Some("list"));
    assert_eq!(cfg.loaded_files.len(), 2);

    cfg.apply_overrides(vec![("rc.color".to_string(), "on".to_string())]);
    assert_eq!(cfg.get_bool("color"), Some(true));
}

#[test]
fn renderer_numbers_tasks_from_one() {
    let temp = tempdir().expect("tempdir");
    let rc = temp.path().join("taskletrc");
    fs::write(&rc, "color = off\n").expect("write rc");
    let cfg = Config::load(Some(&rc)).expect("load config");

    let mut controller = ListController::load(
        FileStore::open(temp.path()).expect("open store"),
    );
    controller.add("write docs").expect("add");
    controller.add("ship").expect("add");

    let renderer = Renderer::new(&cfg, controller.theme()).expect("renderer");
    let mut out = Vec::new();
    renderer
        .write_task_list(&mut out, &controller.rendered(), false)
        .expect("render");
    let text = String::from_utf8(out).expect("utf8");

    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("# "));
    assert!(lines[2].starts_with("1 "));
    assert!(lines[2].contains("write docs"));
    assert!(lines[3].starts_with("2 "));
    assert!(lines[3].contains("❌ 🖊️"));
    assert!(text.ends_with("2 task(s)\n"));
}

#[test]
fn renderer_reports_empty_list() {
    let temp = tempdir().expect("tempdir");
    let rc = temp.path().join("taskletrc");
    fs::write(&rc, "").expect("write rc");
    let cfg = Config::load(Some(&rc)).expect("load config");
    let renderer = Renderer::new(&cfg, Theme::Light).expect("renderer");

    let mut out = Vec::new();
    renderer
        .write_task_list(&mut out, &[], false)
        .expect("render");
    assert_eq!(String::from_utf8(out).expect("utf8"), "No tasks.\n");
}

#[test]
fn writes_recover_from_corrupt_store_file() {
    let temp = tempdir().expect("tempdir");
    let store = FileStore::open(temp.path()).expect("open store");
    fs::write(&store.store_path, "garbage").expect("corrupt store file");
    let backup = store.corrupt_path();

    let mut controller = ListController::load(store);
    controller.add("x").expect("add after corruption");
    controller.toggle_theme().expect("toggle after corruption");

    let store = controller.into_store();
    assert_eq!(
        store.get(TASKS_KEY).expect("read tasks").as_deref(),
        Some(r#"["x"]"#)
    );
    assert_eq!(
        store.get(THEME_KEY).expect("read theme").as_deref(),
        Some("dark")
    );
    assert_eq!(
        fs::read_to_string(backup).expect("backup kept"),
        "garbage"
    );
}

#[test]
fn cli_add_without_text_writes_nothing() {
    let temp = tempdir().expect("tempdir");

    tasklet(temp.path(), &["add"]).expect("bare add");
    tasklet(temp.path(), &["add", ""]).expect("empty add");

    assert_eq!(stored_value(temp.path(), TASKS_KEY), None);
}

#[test]
fn cli_delete_rejects_positions_outside_the_list() {
    let temp = tempdir().expect("tempdir");
    tasklet(temp.path(), &["add", "only", "task"]).expect("add");

    assert!(tasklet(temp.path(), &["delete", "0"]).is_err());
    assert!(tasklet(temp.path(), &["delete", "2"]).is_err());
    assert!(tasklet(temp.path(), &["delete", "one"]).is_err());

    assert_eq!(
        stored_value(temp.path(), TASKS_KEY).as_deref(),
        Some(r#"["only task"]"#)
    );
}

#[test]
fn cli_delete_accepts_yes_on_either_side() {
    let temp = tempdir().expect("tempdir");
    for text in ["a", "b", "c"] {
        tasklet(temp.path(), &["add", text]).expect("add");
    }

    tasklet(temp.path(), &["delete", "2", "--yes"]).expect("trailing --yes");
    tasklet(temp.path(), &["-y", "delete", "1"]).expect("leading -y");

    assert_eq!(
        stored_value(temp.path(), TASKS_KEY).as_deref(),
        Some(r#"["c"]"#)
    );
}

#[test]
fn cli_edit_takes_inline_text_including_empty() {
    let temp = tempdir().expect("tempdir");
    tasklet(temp.path(), &["add", "first"]).expect("add");
    tasklet(temp.path(), &["add", "second"]).expect("add");

    tasklet(temp.path(), &["edit", "1", ""]).expect("edit to empty");
    assert_eq!(
        stored_value(temp.path(), TASKS_KEY).as_deref(),
        Some(r#"["","second"]"#)
    );

    tasklet(temp.path(), &["edit", "2", "new", "text"]).expect("edit words");
    assert_eq!(
        stored_value(temp.path(), TASKS_KEY).as_deref(),
        Some(r#"["","new text"]"#)
    );
}

#[test]
fn cli_theme_toggle_twice_returns_to_light() {
    let temp = tempdir().expect("tempdir");

    tasklet(temp.path(), &["theme", "toggle"]).expect("toggle");
    assert_eq!(stored_value(temp.path(), THEME_KEY).as_deref(), Some("dark"));

    tasklet(temp.path(), &["theme", "toggle"]).expect("toggle");
    assert_eq!(stored_value(temp.path(), THEME_KEY).as_deref(), Some("light"));

    let store = FileStore::open(&temp.path().join("data")).expect("open store");
    assert_eq!(ListController::load(store).theme(), Theme::Light);
}
