use std::cell::RefCell;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;
use std::rc::Rc;

use anyhow::{anyhow, bail, Context, Result};
use fsexplorer_editor::{
    preview, ContentKind, ContentView, EditorSession, FileDraft, FileType, FolderDraft,
};
use fsexplorer_settings::Preferences;
use fsexplorer_tree::{resolve, NodePatch, TreePath, TreeStats, TreeStore};
use tracing::{debug, info};

use crate::view::ExplorerView;

const HELP: &str = "\
commands:
  tree                         show the explorer
  filter [QUERY]               filter by name (no query clears it)
  expand PATH | collapse PATH  open or close a folder
  toggle PATH                  flip a folder open/closed
  mkdir PARENT NAME            create a folder
  touch PARENT STEM [TYPE]     create a txt/json/png file
  upload PARENT LOCAL_FILE     add a file read from disk
  rm PATH                      delete a file or folder
  rename PATH NEW_NAME         rename a node in place
  cat PATH                     preview a file
  write PATH TEXT              replace text content (\\n for newlines)
  append PATH TEXT             add text at the end of a file
  dump                         print the forest as JSON
  stats                        count folders, files and bytes
  help                         this text
  quit                         leave the shell
names containing spaces can be quoted: mkdir src \"my folder\"
";

/// 指令是否要求結束工作階段。 / Whether a command asked to end the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// 互動式檔案總管：持有樹、檢視狀態與偏好設定。 /
/// Interactive explorer session owning the tree, the view state and the preferences.
pub struct Shell {
    store: TreeStore,
    view: Rc<RefCell<ExplorerView>>,
    preferences: Preferences,
}

impl Shell {
    pub fn new(preferences: Preferences) -> Self {
        let mut store = TreeStore::from_folders(preferences.tree.initial_folders.clone());
        let view = Rc::new(RefCell::new(ExplorerView::default()));
        let observed = Rc::clone(&view);
        store.subscribe(move |_, change| observed.borrow_mut().apply_change(change));
        Self {
            store,
            view,
            preferences,
        }
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    /// 逐行執行指令直到輸入結束或 `quit`；單一指令失敗不會中止。 /
    /// Runs commands line by line until end of input or `quit`. A failing command is reported and skipped.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match self.execute(line, out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => {
                    debug!(command = line, error = %err, "command failed");
                    writeln!(out, "error: {err:#}")?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(command, rest)| (command, rest.trim()))
            .unwrap_or((line, ""));
        if matches!(command, "write" | "append") {
            return self.edit_text(command, rest, out);
        }
        let words = split_args(rest)?;
        let args: Vec<&str> = words.iter().map(String::as_str).collect();

        match command {
            "tree" | "ls" => {
                let rendered = self.view.borrow().render(self.store.forest());
                write!(out, "{rendered}")?;
            }
            "filter" => {
                self.view.borrow_mut().set_filter(args.join(" "));
                let rendered = self.view.borrow().render(self.store.forest());
                write!(out, "{rendered}")?;
            }
            "expand" => {
                let path = self.folder_arg(&args)?;
                self.view.borrow_mut().expand(path);
            }
            "collapse" => {
                let path = self.folder_arg(&args)?;
                self.view.borrow_mut().collapse(&path);
            }
            "toggle" => {
                let path = self.folder_arg(&args)?;
                self.view.borrow_mut().toggle(path);
            }
            "mkdir" => {
                let [parent, name] = exact::<2>(&args, "mkdir PARENT NAME")?;
                let node = FolderDraft::new(name).build()?;
                let created = resolve(parent).join(&node.name);
                self.store.create(parent, node)?;
                self.view.borrow_mut().expand(resolve(parent));
                writeln!(out, "created {created}/")?;
            }
            "touch" => {
                let (parent, stem, file_type) = match args.as_slice() {
                    [parent, stem] => (*parent, *stem, self.preferences.editor.default_file_type),
                    [parent, stem, kind] => (*parent, *stem, kind.parse::<FileType>()?),
                    _ => bail!("usage: touch PARENT STEM [TYPE]"),
                };
                let node = FileDraft::new(stem, file_type).build()?;
                let created = resolve(parent).join(&node.name);
                self.store.create(parent, node)?;
                writeln!(out, "created {created}")?;
            }
            "upload" => {
                let [parent, local] = exact::<2>(&args, "upload PARENT LOCAL_FILE")?;
                let local = Path::new(local);
                let bytes = fs::read(local)
                    .with_context(|| format!("failed to read {}", local.display()))?;
                let file_name = local
                    .file_name()
                    .and_then(|name| name.to_str())
                    .ok_or_else(|| anyhow!("{} has no usable file name", local.display()))?;
                let node = FileDraft::from_upload(file_name, bytes)?.build()?;
                let created = resolve(parent).join(&node.name);
                self.store.create(parent, node)?;
                writeln!(out, "uploaded {created}")?;
            }
            "rm" => {
                let [path] = exact::<1>(&args, "rm PATH")?;
                let path = resolve(path);
                if path.is_root() {
                    bail!("refusing to delete the whole tree");
                }
                self.store.delete(&path.to_string())?;
                writeln!(out, "deleted {path}")?;
            }
            "rename" => {
                let [path, name] = exact::<2>(&args, "rename PATH NEW_NAME")?;
                self.store.update(path, NodePatch::rename(name))?;
                writeln!(out, "renamed {} to {name}", resolve(path))?;
            }
            "cat" => {
                let [path] = exact::<1>(&args, "cat PATH")?;
                let node = self
                    .store
                    .node(path)
                    .ok_or_else(|| anyhow!("no node at `{}`", resolve(path)))?;
                match preview(&node)? {
                    ContentView::Text { text, .. } => writeln!(out, "{text}")?,
                    ContentView::Image { bytes } => {
                        let mime = ContentKind::from_name(&node.name).mime_type();
                        writeln!(out, "[{}, {} bytes]", mime.unwrap_or("binary"), bytes.len())?
                    }
                    ContentView::Empty => writeln!(out, "(empty file)")?,
                    ContentView::Unsupported { name } => {
                        writeln!(out, "(no preview for {name})")?
                    }
                }
            }
            "dump" => {
                let json = serde_json::to_string_pretty(self.store.forest())
                    .context("failed to serialize tree")?;
                writeln!(out, "{json}")?;
            }
            "stats" => {
                let stats = TreeStats::collect(self.store.forest());
                writeln!(
                    out,
                    "{} folders, {} files, {} bytes (revision {})",
                    stats.folders,
                    stats.files,
                    stats.content_bytes,
                    self.store.revision()
                )?;
            }
            "help" => {
                let types = [FileType::Txt, FileType::Json, FileType::Png].map(FileType::label);
                write!(out, "{HELP}")?;
                writeln!(out, "file types: {}", types.join(", "))?;
            }
            "quit" | "exit" => {
                info!(revision = self.store.revision(), "shell closed");
                return Ok(Flow::Quit);
            }
            other => bail!("unknown command `{other}` (try `help`)"),
        }
        Ok(Flow::Continue)
    }

    /// `write` replaces the buffer, `append` inserts at its end; TEXT is the raw rest of the line.
    fn edit_text<W: Write>(&mut self, command: &str, rest: &str, out: &mut W) -> Result<Flow> {
        let (path, text) =
            next_word(rest)?.ok_or_else(|| anyhow!("usage: {command} PATH TEXT"))?;
        let text = unescape(text.trim_start());
        let mut session = EditorSession::open(&self.store, &path)?
            .with_json_validation(self.preferences.editor.validate_json_on_save);
        if command == "append" {
            let buffer = session.buffer_mut();
            buffer.set_caret(buffer.contents().len())?;
            buffer.insert_text(&text);
        } else {
            session.set_contents(text);
        }
        let verb = if session.save(&mut self.store)? {
            "saved"
        } else {
            "unchanged"
        };
        writeln!(out, "{verb} {}", session.path())?;
        Ok(Flow::Continue)
    }

    fn folder_arg(&self, args: &[&str]) -> Result<TreePath> {
        let [path] = exact::<1>(args, "PATH")?;
        let node = self
            .store
            .node(path)
            .ok_or_else(|| anyhow!("no node at `{}`", resolve(path)))?;
        if !node.is_folder() {
            bail!("`{}` is not a folder", resolve(path));
        }
        Ok(resolve(path))
    }
}

fn exact<'a, const N: usize>(args: &[&'a str], usage: &str) -> Result<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| anyhow!("usage: {usage}"))
}

/// Splits off the first word of `input`. Double or single quotes keep spaces inside
/// a word; `\"` and `\\` are escapes inside double quotes.
fn next_word(input: &str) -> Result<Option<(String, &str)>> {
    let input = input.trim_start();
    let mut chars = input.char_indices();
    let Some((_, first)) = chars.next() else {
        return Ok(None);
    };
    if first != '"' && first != '\'' {
        let end = input.find(char::is_whitespace).unwrap_or(input.len());
        return Ok(Some((input[..end].to_string(), &input[end..])));
    }

    let mut word = String::new();
    let mut escaped = false;
    for (at, ch) in chars {
        if escaped {
            word.push(ch);
            escaped = false;
        } else if ch == '\\' && first == '"' {
            escaped = true;
        } else if ch == first {
            return Ok(Some((word, &input[at + ch.len_utf8()..])));
        } else {
            word.push(ch);
        }
    }
    bail!("unterminated quote in `{input}`")
}

fn split_args(mut input: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    while let Some((word, rest)) = next_word(input)? {
        words.push(word);
        input = rest;
    }
    Ok(words)
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(shell: &mut Shell, script: &str) -> String {
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn mkdir_touch_and_tree() {
        let mut shell = Shell::new(Preferences::default());
        let output = run(
            &mut shell,
            "mkdir src lib\ntouch src/lib util json\ntoggle src/lib\ntree\n",
        );
        assert_eq!(
            output,
            "created src/lib/\ncreated src/lib/util.json\n\
             ▸ public/\n▸ server/\n▾ src/\n  ▾ lib/\n      util.json\n"
        );
    }

    #[test]
    fn errors_are_reported_and_the_session_continues() {
        let mut shell = Shell::new(Preferences::default());
        let output = run(&mut shell, "touch missing a\nbogus\nrm /\nstats\n");
        assert!(output.contains("error: no node at `missing`"));
        assert!(output.contains("error: unknown command `bogus`"));
        assert!(output.contains("error: refusing to delete the whole tree"));
        assert!(output.ends_with("3 folders, 0 files, 0 bytes (revision 0)\n"));
    }

    #[test]
    fn write_respects_json_validation_preference() {
        let mut strict = Shell::new(Preferences::default());
        let output = run(&mut strict, "touch src data json\nwrite src/data.json {oops\n");
        assert!(output.contains("error: invalid JSON"));

        let mut lenient_prefs = Preferences::default();
        lenient_prefs.editor.validate_json_on_save = false;
        let mut lenient = Shell::new(lenient_prefs);
        let output = run(
            &mut lenient,
            "touch src data json\nwrite src/data.json {oops\ncat src/data.json\n",
        );
        assert!(output.ends_with("saved src/data.json\n{oops\n"));
    }

    #[test]
    fn deleting_a_folder_drops_its_expansion() {
        let mut shell = Shell::new(Preferences::default());
        run(&mut shell, "mkdir src lib\nexpand src/lib\nrm src/lib\nmkdir src lib\n");
        let rendered = shell.view.borrow().render(shell.store().forest());
        assert!(rendered.contains("  ▸ lib/"));
    }

    #[test]
    fn renaming_a_folder_carries_its_expansion() {
        let mut shell = Shell::new(Preferences::default());
        let output = run(
            &mut shell,
            "mkdir src lib\nexpand src\nexpand src/lib\nrename src/lib old\nmkdir src lib\ntree\n",
        );
        assert!(output.ends_with("▸ public/\n▸ server/\n▾ src/\n  ▾ old/\n  ▸ lib/\n"));
    }

    #[test]
    fn quoted_arguments_keep_spaces() {
        let mut shell = Shell::new(Preferences::default());
        let output = run(
            &mut shell,
            "mkdir src \"my lib\"\n\
             touch 'src/my lib' 'read me'\n\
             rename \"src/my lib/read me.txt\" \"notes 2.txt\"\n\
             write \"src/my lib/notes 2.txt\" hi there\n\
             cat \"src/my lib/notes 2.txt\"\n\
             mkdir src \"oops\n",
        );
        assert!(output.contains("created src/my lib/\n"));
        assert!(output.contains("created src/my lib/read me.txt\n"));
        assert!(output.contains("renamed src/my lib/read me.txt to notes 2.txt\n"));
        assert!(output.contains("saved src/my lib/notes 2.txt\nhi there\n"));
        assert!(output.ends_with("error: unterminated quote in `\"oops`\n"));
    }

    #[test]
    fn append_inserts_at_the_end_of_the_buffer() {
        let mut shell = Shell::new(Preferences::default());
        let output = run(
            &mut shell,
            "touch src notes\nwrite src/notes.txt one\nappend src/notes.txt \\ntwo\ncat src/notes.txt\n",
        );
        assert!(output.ends_with("saved src/notes.txt\none\ntwo\n"));
    }

    #[test]
    fn help_lists_file_types() {
        let mut shell = Shell::new(Preferences::default());
        let output = run(&mut shell, "help\n");
        assert!(output.contains("append PATH TEXT"));
        assert!(output.ends_with(
            "file types: Text File (.txt), JSON File (.json), Image File (.png)\n"
        ));
    }

    #[test]
    fn split_args_handles_both_quote_styles() {
        assert_eq!(
            split_args(r#"a "b c" 'd \e' "f\"g""#).unwrap(),
            ["a", "b c", r"d \e", "f\"g"]
        );
        assert!(split_args("  ").unwrap().is_empty());
        assert!(split_args("'open").is_err());
    }

    #[test]
    fn unescape_handles_newlines_and_trailing_backslash() {
        assert_eq!(unescape(r"a\nb\tc\\d\"), "a\nb\tc\\d\\");
    }
}
