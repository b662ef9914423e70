use std::error::Error;
use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli() -> Result<Command, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("fsexplorer-cli")?;
    cmd.arg("--log-level").arg("silent");
    Ok(cmd)
}

#[test]
fn tree_prints_default_folders_collapsed() -> Result<(), Box<dyn Error>> {
    cli()?
        .arg("tree")
        .assert()
        .success()
        .stdout("▸ public/\n▸ server/\n▸ src/\n");
    Ok(())
}

#[test]
fn tree_filter_keeps_only_matching_roots() -> Result<(), Box<dyn Error>> {
    cli()?
        .args(["tree", "--filter", "SER"])
        .assert()
        .success()
        .stdout("▾ server/\n");
    Ok(())
}

#[test]
fn shell_creates_edits_and_dumps_tree() -> Result<(), Box<dyn Error>> {
    let script = "\
# build a small project
mkdir src lib
touch src/lib notes
write src/lib/notes.txt hello\\nworld
cat src/lib/notes.txt
rename src/lib/notes.txt readme.txt
stats
dump
";
    cli()?
        .arg("shell")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("created src/lib/\n"))
        .stdout(predicate::str::contains("saved src/lib/notes.txt\n"))
        .stdout(predicate::str::contains("hello\nworld\n"))
        .stdout(predicate::str::contains("4 folders, 1 files, 11 bytes (revision 4)"))
        .stdout(predicate::str::contains("\"name\": \"readme.txt\""))
        .stdout(predicate::str::contains("\"content\": \"hello\\nworld\""));
    Ok(())
}

#[test]
fn shell_reports_errors_and_keeps_going() -> Result<(), Box<dyn Error>> {
    cli()?
        .arg("shell")
        .write_stdin("mkdir src lib\nmkdir src lib\nrm src/ghost\nquit\nstats\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "error: `src` already contains an entry named `lib`",
        ))
        .stdout(predicate::str::contains("error: no node at `src/ghost`"))
        .stdout(predicate::str::contains("folders").not());
    Ok(())
}

#[test]
fn upload_png_is_stored_as_base64() -> Result<(), Box<dyn Error>> {
    let workspace = tempdir()?;
    let image = workspace.path().join("logo.png");
    fs::write(&image, b"\x89PNG\r\n\x1a\n\x00\x00")?;
    let bogus = workspace.path().join("fake.png");
    fs::write(&bogus, b"not an image")?;

    let script = format!(
        "upload public {}\nupload public {}\ncat public/logo.png\ndump\n",
        image.display(),
        bogus.display()
    );
    cli()?
        .arg("shell")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("uploaded public/logo.png"))
        .stdout(predicate::str::contains("error: uploaded data is not a PNG image"))
        .stdout(predicate::str::contains("[image/png, 10 bytes]"))
        .stdout(predicate::str::contains("\"content\": \"b64:"));
    Ok(())
}

#[test]
fn shell_reads_script_file() -> Result<(), Box<dyn Error>> {
    let workspace = tempdir()?;
    let script = workspace.path().join("session.txt");
    fs::write(&script, "touch server config json\ncat server/config.json\n")?;

    cli()?
        .args(["shell", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout("created server/config.json\n{}\n");
    Ok(())
}

#[test]
fn preferences_control_initial_folders_and_default_type() -> Result<(), Box<dyn Error>> {
    let workspace = tempdir()?;
    let prefs = workspace.path().join("prefs.json");
    fs::write(
        &prefs,
        r#"{ "tree": { "initial_folders": ["docs", " docs ", "a/b", ""] },
             "editor": { "default_file_type": "json" } }"#,
    )?;

    cli()?
        .arg("--preferences")
        .arg(&prefs)
        .arg("shell")
        .write_stdin("touch docs index\ntree\n")
        .assert()
        .success()
        .stdout("created docs/index.json\n▸ docs/\n");
    Ok(())
}

#[test]
fn init_preferences_writes_defaults() -> Result<(), Box<dyn Error>> {
    let workspace = tempdir()?;
    let prefs = workspace.path().join("nested").join("prefs.json");

    cli()?
        .arg("--preferences")
        .arg(&prefs)
        .arg("init-preferences")
        .assert()
        .success();

    let written = fs::read_to_string(&prefs)?;
    assert!(written.contains("\"initial_folders\""));
    assert!(written.contains("\"validate_json_on_save\": true"));

    cli()?
        .arg("init-preferences")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires --preferences"));
    Ok(())
}

#[test]
fn renamed_folder_stays_expanded_under_its_new_name() -> Result<(), Box<dyn Error>> {
    cli()?
        .arg("shell")
        .write_stdin(
            "mkdir src lib\nexpand src/lib\nrename src/lib \"old lib\"\nmkdir src lib\ntree\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "▸ public/\n▸ server/\n▾ src/\n  ▾ old lib/\n  ▸ lib/\n",
        ));
    Ok(())
}
