use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::services::duplicate_guard::{check_duplicates, warn_duplicates};
use crate::common::result::ComposectlResult;
use crate::domain::entities::configuration::StackConfig;
use crate::domain::entities::stack::Stack;
use crate::domain::value_objects::action::Action;
use crate::infrastructure::compose::ComposeClient;
use crate::infrastructure::filesystem::{ConfigStore, StackRepository};
use crate::infrastructure::logging::console;

/// アクション実行の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// 対象となるスタックが見つからなかった（エラーではない）
    NoStacks,
    /// `list` の結果（スキャン順、ステータス付き）
    Listed(Vec<Stack>),
    /// 変更系アクションが全スタックで成功した
    Completed {
        /// 処理したスタック数
        processed: usize,
    },
}

/// スタック操作のユースケース
///
/// 対象を解決し、変更系アクションでは重複チェックを行ってから、
/// ソート順に1スタックずつ逐次実行する。最初の失敗で残りは中断される。
pub struct StackManager {
    repository: StackRepository,
    compose: Arc<ComposeClient>,
    config_store: ConfigStore,
}

impl StackManager {
    /// 新しいStackManagerを作成
    pub fn new(
        repository: StackRepository,
        compose: Arc<ComposeClient>,
        config_store: ConfigStore,
    ) -> Self {
        Self {
            repository,
            compose,
            config_store,
        }
    }

    /// アクション名と対象スタック名（空なら全スタック）を受け取って実行する
    pub async fn execute_action(
        &self,
        action: &str,
        target: Option<&str>,
    ) -> ComposectlResult<ActionOutcome> {
        let action: Action = action.parse()?;
        self.execute(action, target).await
    }

    /// 解析済みのアクションを実行する
    pub async fn execute(
        &self,
        action: Action,
        target: Option<&str>,
    ) -> ComposectlResult<ActionOutcome> {
        let stacks = self.resolve_targets(target).await?;

        if stacks.is_empty() {
            warn!("No stacks found");
            return Ok(ActionOutcome::NoStacks);
        }

        if !action.is_mutating() {
            warn_duplicates(&stacks);
            return Ok(ActionOutcome::Listed(stacks));
        }

        // 1つでも重複があればサブプロセスを起動する前に中断する
        check_duplicates(&stacks)?;

        for stack in &stacks {
            match action {
                Action::Start => self.start_stack(stack).await?,
                Action::Stop => self.stop_stack(stack).await?,
                Action::Restart => self.restart_stack(stack).await?,
                Action::Down => self.down_stack(stack).await?,
                Action::List => {}
            }
        }

        Ok(ActionOutcome::Completed {
            processed: stacks.len(),
        })
    }

    async fn resolve_targets(&self, target: Option<&str>) -> ComposectlResult<Vec<Stack>> {
        match target.filter(|name| !name.is_empty()) {
            Some(name) => Ok(vec![self.repository.find_by_name(name).await?]),
            None => self.repository.find_all().await,
        }
    }

    /// 読み込みに失敗した場合は警告して空の上書き設定を使う
    fn stack_config(&self, stack: &Stack) -> StackConfig {
        match self.config_store.load_stack_override(&stack.directory) {
            Ok(stack_config) => stack_config,
            Err(e) => {
                warn!(
                    "Failed to load config for stack {}, using defaults: {}",
                    stack.name, e
                );
                StackConfig::default()
            }
        }
    }

    async fn start_stack(&self, stack: &Stack) -> ComposectlResult<()> {
        console(format!("==> Starting stack: {}", stack.name));
        info!("Starting stack: {}", stack.name);

        let stack_config = self.stack_config(stack);

        // 停止中でもコンテナが残っていれば作り直さずに再開する
        if self.compose.has_containers(stack).await {
            debug!("Containers exist for stack {}, using 'start'", stack.name);
            self.compose.start_existing(stack, &stack_config).await
        } else {
            debug!("No containers found for stack {}, using 'up'", stack.name);
            self.compose.up(stack, &stack_config).await
        }
    }

    async fn stop_stack(&self, stack: &Stack) -> ComposectlResult<()> {
        console(format!("==> Stopping stack: {}", stack.name));
        info!("Stopping stack: {}", stack.name);

        let stack_config = self.stack_config(stack);
        self.compose.stop(stack, &stack_config).await
    }

    async fn restart_stack(&self, stack: &Stack) -> ComposectlResult<()> {
        info!("Restarting stack: {}", stack.name);
        self.stop_stack(stack).await?;
        self.start_stack(stack).await
    }

    async fn down_stack(&self, stack: &Stack) -> ComposectlResult<()> {
        console(format!("==> Taking down stack: {}", stack.name));
        info!("Taking down stack: {}", stack.name);

        let stack_config = self.stack_config(stack);
        self.compose.down(stack, &stack_config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ComposectlError;
    use crate::domain::entities::configuration::Config;
    use crate::infrastructure::process::RecordingExecutor;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn manager(base_dir: &Path, executor: &RecordingExecutor, dry_run: bool) -> StackManager {
        let compose = Arc::new(ComposeClient::new(
            Arc::new(executor.clone()),
            Config::default(),
            dry_run,
        ));
        StackManager::new(
            StackRepository::new(base_dir, compose.clone()),
            compose,
            ConfigStore::new(base_dir),
        )
    }

    fn make_stacks(base_dir: &Path, dirs: &[&str]) {
        for dir in dirs {
            fs::create_dir_all(base_dir.join("stacks").join(dir)).unwrap();
        }
    }

    /// `compose ... --project-name <name> <verb>` pairs of interactive runs
    fn verbs(executor: &RecordingExecutor) -> Vec<String> {
        executor
            .run_commands()
            .iter()
            .map(|command| {
                let rest = command
                    .split_once("--project-name ")
                    .map(|(_, rest)| rest)
                    .unwrap_or_default();
                let mut parts = rest.split_whitespace();
                let name = parts.next().unwrap_or_default();
                let verb = parts.next().unwrap_or_default();
                format!("{} {}", verb, name)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_unknown_action_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["01-web"]);
        let executor = RecordingExecutor::new();

        let error = manager(temp_dir.path(), &executor, false)
            .execute_action("explode", None)
            .await
            .unwrap_err();

        assert!(matches!(error, ComposectlError::InvalidActionError { .. }));
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_reload_is_restart() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["01-web"]);
        let executor = RecordingExecutor::new();

        let outcome = manager(temp_dir.path(), &executor, false)
            .execute_action("reload", None)
            .await
            .unwrap();

        assert_eq!(outcome, ActionOutcome::Completed { processed: 1 });
        assert_eq!(verbs(&executor), vec!["stop web", "up web"]);
    }

    #[tokio::test]
    async fn test_start_creates_when_no_containers() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["02-database", "01-web"]);
        let executor = RecordingExecutor::new();

        manager(temp_dir.path(), &executor, false)
            .execute(Action::Start, None)
            .await
            .unwrap();

        assert_eq!(verbs(&executor), vec!["up web", "up database"]);
    }

    #[tokio::test]
    async fn test_start_resumes_existing_containers() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["01-web"]);
        let executor = RecordingExecutor::new().with_captured_output("4b1f0c2a\n");

        manager(temp_dir.path(), &executor, false)
            .execute(Action::Start, Some("web"))
            .await
            .unwrap();

        assert_eq!(verbs(&executor), vec!["start web"]);
    }

    #[tokio::test]
    async fn test_start_uses_stack_override() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["01-web"]);
        fs::write(
            temp_dir.path().join("stacks/01-web/config.yaml"),
            "up-args: [--build]\n",
        )
        .unwrap();
        let executor = RecordingExecutor::new();

        manager(temp_dir.path(), &executor, false)
            .execute(Action::Start, None)
            .await
            .unwrap();

        assert!(executor.run_commands()[0].ends_with("up --build"));
    }

    #[tokio::test]
    async fn test_broken_stack_override_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["01-web"]);
        fs::write(
            temp_dir.path().join("stacks/01-web/config.yaml"),
            "up-args: [--build\n",
        )
        .unwrap();
        let executor = RecordingExecutor::new();

        manager(temp_dir.path(), &executor, false)
            .execute(Action::Start, None)
            .await
            .unwrap();

        assert!(executor.run_commands()[0]
            .ends_with("up --detach --wait-timeout 30 --pull always"));
    }

    #[tokio::test]
    async fn test_stop_and_down_dispatch_directly() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["01-web"]);
        let executor = RecordingExecutor::new().with_captured_output("4b1f0c2a\n");
        let manager = manager(temp_dir.path(), &executor, false);

        manager.execute(Action::Stop, None).await.unwrap();
        manager.execute(Action::Down, None).await.unwrap();

        assert_eq!(verbs(&executor), vec!["stop web", "down web"]);
    }

    #[tokio::test]
    async fn test_restart_aborts_when_stop_fails() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["01-web", "02-database"]);
        let executor = RecordingExecutor::new().failing_run_on(" stop");

        let error = manager(temp_dir.path(), &executor, false)
            .execute(Action::Restart, None)
            .await
            .unwrap_err();

        assert!(matches!(error, ComposectlError::ExternalCommandError { .. }));
        assert_eq!(verbs(&executor), vec!["stop web"]);
    }

    #[tokio::test]
    async fn test_batch_aborts_on_first_failure() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["01-web", "02-database", "03-cache"]);
        let executor = RecordingExecutor::new().failing_run_on("database down");

        let error = manager(temp_dir.path(), &executor, false)
            .execute(Action::Down, None)
            .await
            .unwrap_err();

        assert!(error.to_string().contains("database"));
        assert_eq!(verbs(&executor), vec!["down web", "down database"]);
    }

    #[tokio::test]
    async fn test_duplicates_abort_before_any_command() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["01-web", "02-database", "03-web"]);
        let executor = RecordingExecutor::new();

        let error = manager(temp_dir.path(), &executor, false)
            .execute(Action::Stop, None)
            .await
            .unwrap_err();

        assert!(matches!(error, ComposectlError::DuplicateStackError { .. }));
        assert!(executor.run_commands().is_empty());
    }

    #[tokio::test]
    async fn test_named_target_skips_duplicate_check_for_others() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["01-web", "02-database", "03-web"]);
        let executor = RecordingExecutor::new();

        manager(temp_dir.path(), &executor, false)
            .execute(Action::Stop, Some("database"))
            .await
            .unwrap();

        assert_eq!(verbs(&executor), vec!["stop database"]);
    }

    #[tokio::test]
    async fn test_missing_target_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["01-web"]);
        let executor = RecordingExecutor::new();

        let error = manager(temp_dir.path(), &executor, false)
            .execute(Action::Start, Some("missing"))
            .await
            .unwrap_err();

        assert!(matches!(error, ComposectlError::StackNotFoundError { .. }));
        assert!(error.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn test_empty_target_means_all() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["01-web", "02-database"]);
        let executor = RecordingExecutor::new();

        let outcome = manager(temp_dir.path(), &executor, false)
            .execute(Action::Stop, Some(""))
            .await
            .unwrap();

        assert_eq!(outcome, ActionOutcome::Completed { processed: 2 });
    }

    #[tokio::test]
    async fn test_no_stacks_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("stacks")).unwrap();
        let executor = RecordingExecutor::new();

        let outcome = manager(temp_dir.path(), &executor, false)
            .execute(Action::Start, None)
            .await
            .unwrap();

        assert_eq!(outcome, ActionOutcome::NoStacks);
    }

    #[tokio::test]
    async fn test_list_tolerates_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["03-web", "01-web"]);
        let executor = RecordingExecutor::new()
            .with_captured_output(r#"[{"Name":"web","Status":"running(1)"}]"#);

        let outcome = manager(temp_dir.path(), &executor, false)
            .execute(Action::List, None)
            .await
            .unwrap();

        match outcome {
            ActionOutcome::Listed(stacks) => {
                let dirs: Vec<String> = stacks.iter().map(|s| s.dir_name()).collect();
                assert_eq!(dirs, vec!["01-web", "03-web"]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(executor.run_commands().is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_start_never_reaches_executor() {
        let temp_dir = TempDir::new().unwrap();
        make_stacks(temp_dir.path(), &["01-web", "02-database"]);
        let executor = RecordingExecutor::new();

        let outcome = manager(temp_dir.path(), &executor, true)
            .execute(Action::Restart, None)
            .await
            .unwrap();

        assert_eq!(outcome, ActionOutcome::Completed { processed: 2 });
        assert!(executor.calls().is_empty());
    }
}
