use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::models::{Catalog, Chapter, Question, Subject};
use crate::utils::tabular::parse_row;

/// Rows per question block in tabular chapter files: prompt, options A
/// through D, correct letter. Blank lines between blocks are ignored.
const ROWS_PER_QUESTION: usize = 6;

/// Loads the full subject tree from the catalog directory.
///
/// Layout: one folder per subject named `Name - Minutes - <unit>`, holding
/// one folder per chapter named `Name - Quota - <unit>`, holding `.csv`
/// and `.json` question files. Subjects and chapters are numbered in
/// filename order; question ids are unique across the whole catalog.
pub fn load_catalog(root: &Path) -> Result<Catalog> {
    let mut subjects = Vec::new();
    let mut next_question_id = 1;

    for (index, subject_dir) in sorted_subdirs(root)?.iter().enumerate() {
        let folder = folder_name(subject_dir)?;
        let (name, duration_minutes) = parse_subject_folder(folder)?;
        let subject_id = index as i32 + 1;

        let mut chapters = Vec::new();
        let mut quota = 0;
        for (chapter_index, chapter_dir) in sorted_subdirs(subject_dir)?.iter().enumerate() {
            let chapter =
                load_chapter(chapter_dir, subject_id, chapter_index, &mut next_question_id)?;
            quota += chapter.quota;
            chapters.push(chapter);
        }

        tracing::debug!(
            "Loaded subject {}: {} chapters, quota {}",
            name,
            chapters.len(),
            quota
        );
        subjects.push(Subject {
            id: subject_id,
            name: name.clone(),
            // The source layout carries no separate description.
            description: name,
            duration_minutes,
            quota,
            chapters,
        });
    }

    Ok(Catalog::new(subjects))
}

fn load_chapter(
    dir: &Path,
    subject_id: i32,
    index: usize,
    next_question_id: &mut i32,
) -> Result<Chapter> {
    let folder = folder_name(dir)?;
    let (name, quota) = parse_chapter_folder(folder)?;

    let mut questions = Vec::new();
    for file in sorted_files(dir)? {
        match file.extension().and_then(|e| e.to_str()) {
            Some("csv") => questions.extend(read_block_file(&file, next_question_id)?),
            Some("json") => questions.extend(read_json_file(&file, next_question_id)?),
            _ => {}
        }
    }

    if questions.len() < quota {
        bail!(
            "not enough questions in chapter {}: expected {}, got {}",
            name,
            quota,
            questions.len()
        );
    }

    Ok(Chapter {
        id: index as i32 + 1,
        subject_id,
        name,
        quota,
        questions,
    })
}

fn parse_subject_folder(folder: &str) -> Result<(String, i64)> {
    let parts: Vec<&str> = folder.split('-').collect();
    if parts.len() < 3 {
        bail!("invalid subject folder name: {}", folder);
    }
    let minutes: i64 = parts[1]
        .trim()
        .parse()
        .with_context(|| format!("invalid duration in subject folder name: {}", folder))?;
    Ok((parts[0].trim().to_string(), minutes))
}

fn parse_chapter_folder(folder: &str) -> Result<(String, usize)> {
    let parts: Vec<&str> = folder.split('-').collect();
    if parts.len() < 3 {
        bail!("invalid chapter folder name: {}", folder);
    }
    let name = parts[0].trim().to_string();
    let quota: usize = parts[1]
        .trim()
        .parse()
        .with_context(|| format!("invalid quota in chapter folder name: {}", folder))?;
    if quota < 1 {
        bail!("invalid number of questions in chapter: {}", name);
    }
    Ok((name, quota))
}

/// Reads a tabular chapter file: six `label,content` rows per question,
/// blank lines skipped. Only the second cell of each row carries data.
fn read_block_file(path: &Path, next_question_id: &mut i32) -> Result<Vec<Question>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read question file {}", path.display()))?;

    let rows: Vec<Vec<String>> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_row)
        .collect();

    if rows.len() % ROWS_PER_QUESTION != 0 {
        bail!(
            "invalid row count in {}: expected a multiple of {}, got {}",
            path.display(),
            ROWS_PER_QUESTION,
            rows.len()
        );
    }

    let mut questions = Vec::with_capacity(rows.len() / ROWS_PER_QUESTION);
    for block in rows.chunks(ROWS_PER_QUESTION) {
        let mut cells = Vec::with_capacity(ROWS_PER_QUESTION);
        for row in block {
            if row.len() < 2 {
                bail!(
                    "malformed row in {}: expected 2 cells, got {}",
                    path.display(),
                    row.len()
                );
            }
            cells.push(row[1].clone());
        }
        let correct = normalize_correct(&cells[5])
            .with_context(|| format!("in question file {}", path.display()))?;
        questions.push(Question {
            id: *next_question_id,
            prompt: cells[0].clone(),
            option_a: cells[1].clone(),
            option_b: cells[2].clone(),
            option_c: cells[3].clone(),
            option_d: cells[4].clone(),
            correct,
        });
        *next_question_id += 1;
    }
    Ok(questions)
}

/// Reads a chapter file holding a JSON array of question records. Ids in
/// the file are ignored in favor of the catalog-wide counter.
fn read_json_file(path: &Path, next_question_id: &mut i32) -> Result<Vec<Question>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read question file {}", path.display()))?;
    let mut questions: Vec<Question> = serde_json::from_str(&text)
        .with_context(|| format!("invalid question JSON in {}", path.display()))?;
    for question in &mut questions {
        question.id = *next_question_id;
        question.correct = normalize_correct(&question.correct)
            .with_context(|| format!("in question file {}", path.display()))?;
        *next_question_id += 1;
    }
    Ok(questions)
}

fn normalize_correct(raw: &str) -> Result<String> {
    let letter = raw.trim().to_ascii_uppercase();
    match letter.as_str() {
        "A" | "B" | "C" | "D" => Ok(letter),
        _ => bail!("invalid correct answer letter: {:?}, expected A-D", raw),
    }
}

fn folder_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("unreadable folder name at {}", path.display()))
}

fn sorted_subdirs(path: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(path)
        .with_context(|| format!("failed to read catalog directory {}", path.display()))?
    {
        let entry_path = entry?.path();
        if entry_path.is_dir() {
            dirs.push(entry_path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn sorted_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(path)
        .with_context(|| format!("failed to read chapter directory {}", path.display()))?
    {
        let entry_path = entry?.path();
        if entry_path.is_file() {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}
