use crate::core::codec;
use crate::domain::model::{Apprentice, Employee, FridayLunch, Guest, Restaurant};
use crate::domain::ports::Storage;
use crate::utils::error::{LunchError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// File names of the five collections, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvFiles {
    pub apprentices: String,
    pub restaurants: String,
    pub schedule: String,
    pub employees: String,
    pub guests: String,
}

impl Default for CsvFiles {
    fn default() -> Self {
        Self {
            apprentices: "apprentices.csv".to_string(),
            restaurants: "restaurants.csv".to_string(),
            schedule: "schedule.csv".to_string(),
            employees: "employees.csv".to_string(),
            guests: "guests.csv".to_string(),
        }
    }
}

impl CsvFiles {
    pub fn all(&self) -> [&str; 5] {
        [
            self.apprentices.as_str(),
            self.restaurants.as_str(),
            self.schedule.as_str(),
            self.employees.as_str(),
            self.guests.as_str(),
        ]
    }
}

/// Resolves `name` inside `dir`, failing when the file is absent.
pub fn resolve_resource(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(LunchError::ResourceNotFound {
            name: path.display().to_string(),
        })
    }
}

/// File-backed storage. Each collection lives in its own CSV file and every
/// save rewrites that file from scratch. Rows are encoded in memory first, so
/// a save the codec rejects leaves the file as it was.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    dir: PathBuf,
    files: CsvFiles,
}

impl CsvStorage {
    pub fn new(dir: impl Into<PathBuf>, files: CsvFiles) -> Self {
        Self {
            dir: dir.into(),
            files,
        }
    }

    /// Like [`CsvStorage::new`] but fails up-front if any file is missing.
    pub fn open(dir: impl Into<PathBuf>, files: CsvFiles) -> Result<Self> {
        let storage = Self::new(dir, files);
        for name in storage.files.all() {
            resolve_resource(&storage.dir, name)?;
        }
        Ok(storage)
    }

    /// Creates the data directory and any missing file as an empty collection.
    /// Existing files are left untouched.
    pub fn initialise(dir: impl Into<PathBuf>, files: CsvFiles) -> Result<Self> {
        let storage = Self::new(dir, files);
        fs::create_dir_all(&storage.dir).map_err(|e| LunchError::file_access(&storage.dir, e))?;

        for name in storage.files.all() {
            let path = storage.dir.join(name);
            if !path.exists() {
                File::create(&path).map_err(|e| LunchError::file_access(&path, e))?;
                tracing::info!("Created empty {}", path.display());
            }
        }
        Ok(storage)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load<T, F>(&self, name: &str, parse: F) -> Result<Vec<T>>
    where
        F: FnOnce(BufReader<File>, &str) -> Result<Vec<T>>,
    {
        let path = self.dir.join(name);
        let file = File::open(&path).map_err(|e| LunchError::file_access(&path, e))?;
        let items = parse(BufReader::new(file), name)?;
        tracing::debug!("Loaded {} rows from {}", items.len(), path.display());
        Ok(items)
    }

    fn store<F>(&self, name: &str, rows: usize, write: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let path = self.dir.join(name);
        let mut encoded = Vec::new();
        write(&mut encoded)?;
        fs::write(&path, encoded).map_err(|e| LunchError::file_access(&path, e))?;
        tracing::info!("Saved {} rows to {}", rows, path.display());
        Ok(())
    }
}

impl Storage for CsvStorage {
    fn get_schedule(&self) -> Result<Vec<FridayLunch>> {
        self.load(&self.files.schedule, codec::read_schedule)
    }

    fn save_schedule(&mut self, schedule: &[FridayLunch]) -> Result<()> {
        self.store(&self.files.schedule, schedule.len(), |sink| {
            codec::write_schedule(sink, schedule)
        })
    }

    fn get_apprentices(&self) -> Result<Vec<Apprentice>> {
        self.load(&self.files.apprentices, codec::read_apprentices)
    }

    fn get_restaurants(&self) -> Result<Vec<Restaurant>> {
        self.load(&self.files.restaurants, codec::read_restaurants)
    }

    fn get_employees(&self) -> Result<Vec<Employee>> {
        self.load(&self.files.employees, codec::read_employees)
    }

    fn save_employees(&mut self, employees: &[Employee]) -> Result<()> {
        self.store(&self.files.employees, employees.len(), |sink| {
            codec::write_employees(sink, employees)
        })
    }

    fn get_guests(&self) -> Result<Vec<Guest>> {
        self.load(&self.files.guests, codec::read_guests)
    }

    fn save_guests(&mut self, guests: &[Guest]) -> Result<()> {
        self.store(&self.files.guests, guests.len(), |sink| {
            codec::write_guests(sink, guests)
        })
    }
}
