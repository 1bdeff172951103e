//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, CreateStudentRequest, StudentJson};
use crate::config::{Backend, Config};
use marksheet_core::{MarksheetError, Registry, StudentId, StudentRecord};
use std::path::{Path, PathBuf};

/// Maximum size of a create payload file (1 MB).
const MAX_PAYLOAD_FILE_SIZE: u64 = 1024 * 1024;

/// Canonicalize an input path and make sure it is a regular file of
/// acceptable size.
fn validate_input_file(path: &Path) -> Result<PathBuf, MarksheetError> {
    let canonical = path.canonicalize().map_err(|e| {
        MarksheetError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    let metadata = std::fs::metadata(&canonical)
        .map_err(|e| MarksheetError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if !metadata.is_file() {
        return Err(MarksheetError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > MAX_PAYLOAD_FILE_SIZE {
        return Err(MarksheetError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_PAYLOAD_FILE_SIZE
        )));
    }

    Ok(canonical)
}

fn print_record(record: &StudentRecord, json_mode: bool) {
    let student = StudentJson::from(record);

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&student).unwrap_or_default()
        );
        return;
    }

    println!("Student #{}", student.id);
    println!("==================");
    println!("Name:    {} {}", student.first_name, student.last_name);
    println!("DOB:     {}", student.dob);
    println!("Section: {}", student.section);
    println!("Gender:  {}", student.gender);
    println!(
        "Marks:   {} / {} / {}",
        student.marks1, student.marks2, student.marks3
    );
    println!("Total:   {}", student.total);
    println!("Average: {:.2}", student.average);
    println!("Result:  {}", student.result);
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &Config) -> Result<(), MarksheetError> {
    let registry = config.storage.open_registry()?;

    println!("Marksheet Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", config.server.host);
    println!("  Port:     {}", config.server.port);
    println!("  Backend:  {}", config.storage.backend.as_str());
    println!("  Database: {:?}", config.storage.path);
    println!();
    println!("Endpoints:");
    println!("  POST /students                  - Create a student");
    println!("  PUT  /students/{{id}}/update-marks - Update marks");
    println!("  GET  /status                    - Registry status");
    println!("  GET  /health                    - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    api::run_server(&addr, registry, &config.http).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show registry status.
pub fn cmd_status(config: &Config, json_mode: bool) -> Result<(), MarksheetError> {
    let registry = config.storage.open_registry()?;
    let count = registry.student_count()?;

    if json_mode {
        let output = serde_json::json!({
            "database": config.storage.path.to_string_lossy(),
            "backend": registry.backend_name(),
            "student_count": count,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Marksheet Status");
    println!("================");
    println!("Database: {:?}", config.storage.path);
    println!("Backend:  {}", registry.backend_name());
    println!();
    println!("Students: {}", count);

    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Initialize a new database.
pub fn cmd_init(config: &Config, force: bool) -> Result<(), MarksheetError> {
    let path = &config.storage.path;

    if config.storage.backend == Backend::Memory {
        println!("Memory backend needs no initialization");
        return Ok(());
    }

    if path.exists() {
        if !force {
            return Err(MarksheetError::IoError(
                "Database already exists. Use --force to overwrite.".to_string(),
            ));
        }
        std::fs::remove_file(path)
            .map_err(|e| MarksheetError::IoError(format!("Remove db: {}", e)))?;
    }

    let _registry = Registry::with_redb(path)?;
    println!("Initialized new redb database at {:?}", path);
    Ok(())
}

// =============================================================================
// CREATE COMMAND
// =============================================================================

/// Create a student from a JSON payload file.
pub fn cmd_create(config: &Config, json_mode: bool, file: &Path) -> Result<(), MarksheetError> {
    let validated_path = validate_input_file(file)?;
    let data = std::fs::read(&validated_path)
        .map_err(|e| MarksheetError::IoError(format!("Read file: {}", e)))?;
    let request: CreateStudentRequest = serde_json::from_slice(&data)
        .map_err(|e| MarksheetError::SerializationError(format!("Invalid payload: {}", e)))?;

    let mut registry = config.storage.open_registry()?;
    let record = registry.create_student(&request.into_new_student())?;
    tracing::info!(student_id = record.id().0, "Student created");

    print_record(&record, json_mode);
    Ok(())
}

// =============================================================================
// UPDATE MARKS COMMAND
// =============================================================================

/// Replace the marks of a student.
pub fn cmd_update_marks(
    config: &Config,
    json_mode: bool,
    id: u64,
    marks1: Option<i64>,
    marks2: Option<i64>,
    marks3: Option<i64>,
) -> Result<(), MarksheetError> {
    let mut registry = config.storage.open_registry()?;
    let record = registry.update_student_marks(StudentId(id), marks1, marks2, marks3)?;
    tracing::info!(student_id = id, "Marks updated");

    print_record(&record, json_mode);
    Ok(())
}

// =============================================================================
// SHOW COMMAND
// =============================================================================

/// Print one student record.
pub fn cmd_show(config: &Config, json_mode: bool, id: u64) -> Result<(), MarksheetError> {
    let registry = config.storage.open_registry()?;
    let record = registry.find_student(StudentId(id))?;

    print_record(&record, json_mode);
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use chrono::{Local, Months};
    use tempfile::tempdir;

    fn redb_config(path: PathBuf) -> Config {
        Config {
            storage: StorageConfig {
                backend: Backend::Redb,
                path,
            },
            ..Config::default()
        }
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let temp = tempdir().expect("temp dir");
        let config = redb_config(temp.path().join("students.redb"));

        cmd_init(&config, false).expect("first init");
        assert!(cmd_init(&config, false).is_err());
        cmd_init(&config, true).expect("forced init");
    }

    #[test]
    fn create_update_show_against_redb() {
        let temp = tempdir().expect("temp dir");
        let config = redb_config(temp.path().join("students.redb"));

        let dob = Local::now()
            .date_naive()
            .checked_sub_months(Months::new(17 * 12))
            .expect("date");
        let payload = temp.path().join("student.json");
        std::fs::write(
            &payload,
            serde_json::json!({
                "firstName": "Ann",
                "lastName": "Lee",
                "dob": dob,
                "section": "A",
                "gender": "F",
                "marks1": 60,
                "marks2": 70,
                "marks3": 80
            })
            .to_string(),
        )
        .expect("write payload");

        cmd_create(&config, true, &payload).expect("create");
        cmd_update_marks(&config, true, 1, Some(30), Some(90), Some(90)).expect("update");
        cmd_show(&config, true, 1).expect("show");

        let registry = config.storage.open_registry().expect("open");
        let record = registry.find_student(StudentId(1)).expect("find");
        assert_eq!(record.results().total(), 210);
    }

    #[test]
    fn update_unknown_student_fails() {
        let temp = tempdir().expect("temp dir");
        let config = redb_config(temp.path().join("students.redb"));

        let err = cmd_update_marks(&config, true, 999, Some(50), Some(50), Some(50))
            .expect_err("unknown id");
        assert_eq!(err, MarksheetError::NotFound(StudentId(999)));
    }

    #[test]
    fn create_rejects_missing_file() {
        let temp = tempdir().expect("temp dir");
        let config = redb_config(temp.path().join("students.redb"));

        let err = cmd_create(&config, true, &temp.path().join("absent.json")).expect_err("missing");
        assert!(matches!(err, MarksheetError::IoError(_)));
    }
}
