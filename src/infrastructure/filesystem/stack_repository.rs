use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

use crate::common::error::ComposectlError;
use crate::common::result::ComposectlResult;
use crate::domain::entities::stack::{Stack, StackStatus};
use crate::domain::value_objects::stack_dir_name::{extract_stack_name, is_valid_stack_dir_name};
use crate::infrastructure::compose::ComposeClient;

/// Name of the directory holding one subdirectory per stack
pub const STACKS_DIR_NAME: &str = "stacks";

/// Discovers stacks under `<base>/stacks` and annotates them with live status
pub struct StackRepository {
    stacks_dir: PathBuf,
    compose: Arc<ComposeClient>,
}

impl StackRepository {
    /// Create a repository for the given base directory
    pub fn new(base_dir: impl AsRef<Path>, compose: Arc<ComposeClient>) -> Self {
        Self {
            stacks_dir: base_dir.as_ref().join(STACKS_DIR_NAME),
            compose,
        }
    }

    /// Directory scanned for stacks
    pub fn stacks_dir(&self) -> &Path {
        &self.stacks_dir
    }

    /// All valid stacks, sorted by directory name, with status populated.
    ///
    /// Entries that are not directories or do not follow the `NN-name`
    /// convention are skipped with a warning.
    pub async fn find_all(&self) -> ComposectlResult<Vec<Stack>> {
        let mut stacks = self.scan()?;
        self.populate_statuses(&mut stacks).await;
        Ok(stacks)
    }

    /// First stack whose logical name or directory name equals `name`
    pub async fn find_by_name(&self, name: &str) -> ComposectlResult<Stack> {
        self.find_all()
            .await?
            .into_iter()
            .find(|stack| stack.matches(name))
            .ok_or_else(|| ComposectlError::stack_not_found(name))
    }

    fn scan(&self) -> ComposectlResult<Vec<Stack>> {
        if !self.stacks_dir.exists() {
            return Err(ComposectlError::directory_not_found(&self.stacks_dir));
        }

        let entries = fs::read_dir(&self.stacks_dir).map_err(|e| {
            ComposectlError::filesystem_error_with_source(
                "reading stacks directory",
                Some(self.stacks_dir.clone()),
                e,
            )
        })?;

        let mut stacks = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                ComposectlError::filesystem_error_with_source(
                    "reading stacks directory entry",
                    Some(self.stacks_dir.clone()),
                    e,
                )
            })?;

            let path = entry.path();
            let dir_name = entry.file_name().to_string_lossy().into_owned();

            if !path.is_dir() {
                warn!("Skipping non-directory entry: {}", dir_name);
                continue;
            }

            if !is_valid_stack_dir_name(&dir_name) {
                warn!("Skipping directory with invalid name: {}", dir_name);
                continue;
            }

            let Some(name) = extract_stack_name(&dir_name) else {
                warn!("Skipping directory with invalid name pattern: {}", dir_name);
                continue;
            };

            stacks.push(Stack::new(name, path.clone()));
        }

        // the two-digit prefix makes byte order the execution order
        stacks.sort_by(|a, b| a.dir_name().cmp(&b.dir_name()));
        Ok(stacks)
    }

    async fn populate_statuses(&self, stacks: &mut [Stack]) {
        let statuses = self.compose.list_all_statuses().await;
        for stack in stacks.iter_mut() {
            let status = statuses
                .get(&stack.name)
                .copied()
                .unwrap_or(StackStatus::Down);
            stack.status = Some(status);
        }
    }
}
