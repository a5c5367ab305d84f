use std::time::Duration;
use taskline_compiler::ChangeWatcher;
use taskline_test_utils::Project;
use tokio::task::JoinHandle;
use tokio::time::Instant;

const SETTLE: Duration = Duration::from_millis(300);

/// Poll the page until `accept` holds, failing after ten seconds
async fn wait_for_output(project: &Project, accept: impl Fn(&str) -> bool) -> String {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let output = std::fs::read_to_string(project.output_path()).unwrap_or_default();
        if accept(&output) {
            return output;
        }
        assert!(Instant::now() < deadline, "page never updated, last output: {output:?}");
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

async fn start_watching(project: &Project) -> JoinHandle<()> {
    let compiler = project.compiler();
    compiler.bootstrap().await.unwrap();
    compiler.compile().await.unwrap();

    let watcher = ChangeWatcher::new(compiler);
    let handle = tokio::spawn(async move {
        watcher.run().await.unwrap();
    });
    tokio::time::sleep(SETTLE).await;
    handle
}

#[tokio::test(flavor = "multi_thread")]
async fn recompiles_as_inputs_change() {
    let project = Project::new().with_config(|c| c.with_debounce_ms(50));
    project.write_template("{{POSTS_COUNT}}|{{MERMAID_TIMELINE}}");
    let handle = start_watching(&project).await;
    assert!(project.output().starts_with("0|gantt"));
    assert!(!project.root().join("config").exists());

    project.write_post("a.md", "---\ntitle: First\n---\n");
    wait_for_output(&project, |out| out.starts_with("1|")).await;

    // config/ did not exist when watching started
    project.write_timeline("gantt\n    title Created later");
    wait_for_output(&project, |out| out.ends_with("title Created later")).await;

    project.write_timeline("gantt\n    title Changed");
    wait_for_output(&project, |out| out.ends_with("title Changed")).await;

    project.remove_post("a.md");
    let output = wait_for_output(&project, |out| out.starts_with("0|")).await;
    assert_eq!(output, "0|gantt\n    title Changed");

    handle.abort();
}

#[tokio::test(flavor = "multi_thread")]
async fn template_created_after_start_is_picked_up() {
    let project = Project::new().with_config(|c| c.with_debounce_ms(50));
    let handle = start_watching(&project).await;
    assert!(project.output().starts_with("<!DOCTYPE html>"));
    assert!(!project.root().join("src").exists());

    project.write_template("{{POSTS_COUNT}} documents");
    wait_for_output(&project, |out| out == "0 documents").await;

    project.write_post("a.md", "a");
    wait_for_output(&project, |out| out == "1 documents").await;

    handle.abort();
}

#[tokio::test(flavor = "multi_thread")]
async fn hidden_files_do_not_recompile() {
    let project = Project::new().with_config(|c| c.with_debounce_ms(50));
    project.write_template("{{POSTS_COUNT}}");
    let handle = start_watching(&project).await;
    let before = std::fs::metadata(project.output_path()).unwrap().modified().unwrap();

    project.write_post(".draft.md.swp", "scratch");
    tokio::time::sleep(SETTLE * 2).await;

    let after = std::fs::metadata(project.output_path()).unwrap().modified().unwrap();
    assert_eq!(before, after);
    assert_eq!(project.output(), "0");

    handle.abort();
}
