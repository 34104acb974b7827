//! Scaffold a new garden note

use anyhow::Result;
use chrono::NaiveDate;
use inquire::{Confirm, InquireError, MultiSelect, Select, Text};
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Tag choices as (label, value)
pub const TAG_CHOICES: &[(&str, &str)] = &[
    ("CLI", "cli"),
    ("Gatsby", "gatsby"),
    ("JavaScript", "javascript"),
    ("React", "react"),
];

pub const ICON_CHOICES: &[&str] = &["general", "cli", "gatsby", "javascript", "react"];

/// Source of answers for the wizard.
///
/// Each method returns `None` when the user cancels the prompt.
pub trait Prompter {
    fn text(&mut self, message: &str, default: Option<&str>) -> Result<Option<String>>;
    /// Returns the chosen labels
    fn multi_select(&mut self, message: &str, options: &[&str]) -> Result<Option<Vec<String>>>;
    fn select(&mut self, message: &str, options: &[&str]) -> Result<Option<String>>;
    fn confirm(&mut self, message: &str) -> Result<Option<bool>>;
}

/// Terminal prompts
pub struct InquirePrompter;

/// Map a cancelled prompt to `None`
fn cancellable<T>(result: std::result::Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Prompter for InquirePrompter {
    fn text(&mut self, message: &str, default: Option<&str>) -> Result<Option<String>> {
        let mut prompt = Text::new(message);
        if let Some(default) = default {
            prompt = prompt.with_default(default);
        }
        cancellable(prompt.prompt())
    }

    fn multi_select(&mut self, message: &str, options: &[&str]) -> Result<Option<Vec<String>>> {
        let options: Vec<String> = options.iter().map(|s| s.to_string()).collect();
        cancellable(
            MultiSelect::new(message, options)
                .with_help_message("Space to toggle, Enter to accept")
                .prompt(),
        )
    }

    fn select(&mut self, message: &str, options: &[&str]) -> Result<Option<String>> {
        let options: Vec<String> = options.iter().map(|s| s.to_string()).collect();
        cancellable(Select::new(message, options).prompt())
    }

    fn confirm(&mut self, message: &str) -> Result<Option<bool>> {
        cancellable(Confirm::new(message).with_default(false).prompt())
    }
}

/// Answers collected by the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GardenForm {
    pub title: String,
    pub date: String,
    pub icon: String,
    pub tags: Vec<String>,
}

impl GardenForm {
    /// Front-matter document written to the new file
    pub fn render_frontmatter(&self) -> String {
        let tags: Vec<String> = self.tags.iter().map(|t| format!("  - {}", t)).collect();
        format!(
            "---\ntitle: {}\ndate: {}\nicon: \"{}\"\ntags:\n{}\n---",
            yaml_quoted(&self.title),
            self.date,
            self.icon,
            tags.join("\n")
        )
    }

    /// `<content dir>/<garden source>/<date>--<slug>/index.mdx`
    pub fn target_path(&self, site: &Site) -> PathBuf {
        site.garden_dir()
            .join(format!("{}--{}", self.date, slug::slugify(&self.title)))
            .join("index.mdx")
    }
}

/// Double-quoted YAML scalar
fn yaml_quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Ask for title, date, tags and icon. `None` if any prompt was cancelled.
pub fn collect_form<P: Prompter>(prompter: &mut P) -> Result<Option<GardenForm>> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let title = loop {
        match prompter.text("Title", None)? {
            None => return Ok(None),
            Some(t) if t.trim().is_empty() => println!("A title is required"),
            Some(t) => break t.trim().to_string(),
        }
    };
    let date = loop {
        let Some(date) = prompter.text("Date", Some(&today))? else {
            return Ok(None);
        };
        let date = date.trim();
        if date.is_empty() {
            break today;
        }
        // the date becomes part of the note's directory name
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(_) => break date.to_string(),
            Err(_) => println!("Expected a date like {}", today),
        }
    };

    let labels: Vec<&str> = TAG_CHOICES.iter().map(|(label, _)| *label).collect();
    let Some(chosen) = prompter.multi_select("Choose your tags", &labels)? else {
        return Ok(None);
    };
    // keep choice order, not selection order
    let tags = TAG_CHOICES
        .iter()
        .filter(|(label, _)| chosen.iter().any(|c| c == label))
        .map(|(_, value)| value.to_string())
        .collect();

    let Some(icon) = prompter.select("Pick an icon", ICON_CHOICES)? else {
        return Ok(None);
    };

    Ok(Some(GardenForm {
        title,
        date,
        icon,
        tags,
    }))
}

/// Run the wizard. Returns the path written, or `None` when aborted.
pub fn run<P: Prompter>(site: &Site, prompter: &mut P) -> Result<Option<PathBuf>> {
    let Some(form) = collect_form(prompter)? else {
        println!("Aborting...");
        return Ok(None);
    };

    let path = form.target_path(site);
    let frontmatter = form.render_frontmatter();
    println!(
        "The file {} will be created with:\n\n{}",
        path.display(),
        frontmatter
    );

    if prompter.confirm("Want to confirm?")? != Some(true) {
        println!("Aborting...");
        return Ok(None);
    }

    if path.exists() {
        anyhow::bail!("File already exists: {:?}", path);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, frontmatter)?;
    tracing::debug!("Wrote garden note {:?}", path);
    println!("Successfully created {}", path.display());

    Ok(Some(path))
}
