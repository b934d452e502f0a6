//! `mongosh`-backed processor source
//!
//! Runs short scripts through `mongosh --eval` against a stream processing
//! instance and parses the Extended JSON they print.

use log::{debug, warn};
use serde_json::Value;

use super::{ProcessorInfo, ProcessorSource, ProcessorStats, SourceError};
use crate::infra::{CommandExecutor, RealCommandExecutor};

/// Default shell binary name
pub const DEFAULT_MONGOSH_BINARY: &str = "mongosh";

const LIST_SCRIPT: &str =
    "print(EJSON.stringify(sp.listStreamProcessors().map(p => ({ name: p.name }))))";

/// Processor source that shells out to `mongosh`
///
/// # Examples
///
/// ```no_run
/// use asp_tier_sizer::source::{MongoshSource, ProcessorSource};
///
/// let source = MongoshSource::new(Some("mongodb://atlas-stream-example/".to_string()));
/// for processor in source.list_processors()? {
///     println!("{}", processor.name);
/// }
/// # Ok::<(), asp_tier_sizer::source::SourceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MongoshSource<CE: CommandExecutor = RealCommandExecutor> {
    binary: String,
    uri: Option<String>,
    cmd_executor: CE,
}

impl MongoshSource<RealCommandExecutor> {
    /// Create a source using the `mongosh` binary on PATH
    pub fn new(uri: Option<String>) -> Self {
        Self::with_executor(DEFAULT_MONGOSH_BINARY, uri, RealCommandExecutor)
    }
}

impl<CE: CommandExecutor> MongoshSource<CE> {
    /// Create a source with a custom binary and command executor
    pub fn with_executor(binary: impl Into<String>, uri: Option<String>, cmd_executor: CE) -> Self {
        Self {
            binary: binary.into(),
            uri,
            cmd_executor,
        }
    }

    /// Script printing one entry per name: `null` when the processor exposes
    /// no stats capability, `{ document }` on success, `{ error }` when the
    /// stats call throws
    fn stats_script(names: &[String]) -> String {
        // A JSON array of strings is also a valid JS array literal.
        let quoted = Value::from(names.to_vec()).to_string();
        format!(
            "print(EJSON.stringify({quoted}.map(name => {{ \
               const p = sp[name]; \
               if (typeof p?.stats !== 'function') {{ return null; }} \
               try {{ return {{ document: p.stats.call(p) }}; }} \
               catch (e) {{ return {{ error: String(e) }}; }} \
             }})))"
        )
    }

    /// Decode one entry printed by [`stats_script`](Self::stats_script)
    fn stats_entry(name: &str, entry: Value) -> Result<ProcessorStats, SourceError> {
        let mut fields = match entry {
            Value::Null => return Err(SourceError::StatsUnavailable(name.to_string())),
            Value::Object(fields) => fields,
            other => {
                return Err(SourceError::Remote {
                    processor: name.to_string(),
                    message: format!("unexpected stats entry {}", other),
                })
            }
        };

        if let Some(error) = fields.remove("error") {
            return Err(SourceError::Remote {
                processor: name.to_string(),
                message: error.as_str().map_or_else(|| error.to_string(), str::to_string),
            });
        }

        match fields.remove("document") {
            Some(document) if !document.is_null() => Ok(ProcessorStats::from_document(document)),
            _ => Err(SourceError::StatsUnavailable(name.to_string())),
        }
    }

    /// Run a script and return the last non-empty line it printed
    fn run_script(&self, script: &str) -> Result<String, SourceError> {
        debug!("running {} --eval {}", self.binary, script);

        let output = self.cmd_executor.execute(
            |cmd| {
                if let Some(uri) = &self.uri {
                    cmd.arg(uri);
                }
                cmd.args(["--quiet", "--norc", "--eval", script])
            },
            &self.binary,
        )?;

        if !output.status.success() {
            return Err(SourceError::CommandFailed {
                program: self.binary.clone(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout)?;
        stdout
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| SourceError::EmptyOutput(self.binary.clone()))
    }
}

impl<CE: CommandExecutor> ProcessorSource for MongoshSource<CE> {
    fn list_processors(&self) -> Result<Vec<ProcessorInfo>, SourceError> {
        let line = self.run_script(LIST_SCRIPT)?;
        serde_json::from_str(&line).map_err(|source| SourceError::Json {
            context: "processor listing".to_string(),
            source,
        })
    }

    fn processor_stats(&self, name: &str) -> Result<ProcessorStats, SourceError> {
        self.processor_stats_batch(&[name.to_string()])
            .into_iter()
            .next()
            .unwrap_or_else(|| Err(SourceError::StatsUnavailable(name.to_string())))
    }

    /// Fetch every processor's stats with a single mongosh process
    ///
    /// A failed or malformed run fails every name with the same message.
    fn processor_stats_batch(&self, names: &[String]) -> Vec<Result<ProcessorStats, SourceError>> {
        if names.is_empty() {
            return Vec::new();
        }

        let entries = self.run_script(&Self::stats_script(names)).and_then(|line| {
            serde_json::from_str::<Vec<Value>>(&line).map_err(|source| SourceError::Json {
                context: "processor stats".to_string(),
                source,
            })
        });

        let failure = match entries {
            Ok(entries) if entries.len() == names.len() => {
                return names
                    .iter()
                    .zip(entries)
                    .map(|(name, entry)| Self::stats_entry(name, entry))
                    .collect();
            }
            Ok(entries) => format!(
                "{} returned {} stats entries for {} processors",
                self.binary,
                entries.len(),
                names.len()
            ),
            Err(e) => e.to_string(),
        };

        warn!("stats fetch failed: {}", failure);
        names
            .iter()
            .map(|name| {
                Err(SourceError::Remote {
                    processor: name.clone(),
                    message: failure.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::mock_exit_status;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;
    use std::process::{Command, Output};

    // Mock CommandExecutor replaying scripted outputs in order
    struct ScriptedExecutor {
        responses: RefCell<VecDeque<io::Result<Output>>>,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl ScriptedExecutor {
        fn new() -> Self {
            Self {
                responses: RefCell::new(VecDeque::new()),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn respond(self, code: i32, stdout: &str, stderr: &str) -> Self {
            self.responses.borrow_mut().push_back(Ok(Output {
                status: mock_exit_status(code),
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
            }));
            self
        }

        fn fail_to_spawn(self) -> Self {
            self.responses
                .borrow_mut()
                .push_back(Err(io::Error::new(io::ErrorKind::NotFound, "mongosh not found")));
            self
        }
    }

    impl CommandExecutor for &ScriptedExecutor {
        fn output(&self, cmd: &mut Command) -> io::Result<Output> {
            self.calls.borrow_mut().push(
                cmd.get_args()
                    .map(|a| a.to_string_lossy().into_owned())
                    .collect(),
            );
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(io::Error::other("no scripted response")))
        }
    }

    #[test]
    fn test_list_processors_parses_names_in_order() {
        let executor = ScriptedExecutor::new().respond(
            0,
            r#"[{"name":"processor_one"},{"name":"data_ingest"}]"#,
            "",
        );
        let source = MongoshSource::with_executor("mongosh", None, &executor);

        let names: Vec<String> = source
            .list_processors()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["processor_one", "data_ingest"]);
    }

    #[test]
    fn test_uri_is_passed_before_flags() {
        let executor = ScriptedExecutor::new().respond(0, "[]", "");
        let source = MongoshSource::with_executor(
            "mongosh",
            Some("mongodb://example/".to_string()),
            &executor,
        );

        source.list_processors().unwrap();

        let calls = executor.calls.borrow();
        assert_eq!(calls[0][0], "mongodb://example/");
        assert_eq!(calls[0][1..4], ["--quiet", "--norc", "--eval"]);
    }

    #[test]
    fn test_list_processors_uses_last_output_line() {
        let executor = ScriptedExecutor::new().respond(
            0,
            "Warning: some shell notice\n[{\"name\":\"p\"}]\n\n",
            "",
        );
        let source = MongoshSource::with_executor("mongosh", None, &executor);

        assert_eq!(source.list_processors().unwrap().len(), 1);
    }

    #[test]
    fn test_list_processors_reports_command_failure() {
        let executor = ScriptedExecutor::new().respond(1, "", "MongoServerError: unauthorized\n");
        let source = MongoshSource::with_executor("mongosh", None, &executor);

        match source.list_processors() {
            Err(SourceError::CommandFailed { code, stderr, .. }) => {
                assert_eq!(code, 1);
                assert_eq!(stderr, "MongoServerError: unauthorized");
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_list_processors_reports_spawn_failure_as_io() {
        let executor = ScriptedExecutor::new().fail_to_spawn();
        let source = MongoshSource::with_executor("mongosh", None, &executor);

        assert!(matches!(source.list_processors(), Err(SourceError::Io(_))));
    }

    #[test]
    fn test_list_processors_rejects_malformed_json() {
        let executor = ScriptedExecutor::new().respond(0, "not json", "");
        let source = MongoshSource::with_executor("mongosh", None, &executor);

        assert!(matches!(
            source.list_processors(),
            Err(SourceError::Json { .. })
        ));
    }

    #[test]
    fn test_empty_output_is_an_error() {
        let executor = ScriptedExecutor::new().respond(0, "\n  \n", "");
        let source = MongoshSource::with_executor("mongosh", None, &executor);

        assert!(matches!(
            source.list_processors(),
            Err(SourceError::EmptyOutput(_))
        ));
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_processor_stats_decodes_number_long() {
        let executor = ScriptedExecutor::new().respond(
            0,
            r#"[{"document":{"ok":1,"stats":{"memoryUsageBytes":{"$numberLong":"9007199254740993"}}}}]"#,
            "",
        );
        let source = MongoshSource::with_executor("mongosh", None, &executor);

        let stats = source.processor_stats("big").unwrap();
        assert_eq!(stats.memory_usage_bytes(), Some(9_007_199_254_740_993));
    }

    #[test]
    fn test_processor_stats_null_means_unavailable() {
        let executor = ScriptedExecutor::new().respond(0, "[null]", "");
        let source = MongoshSource::with_executor("mongosh", None, &executor);

        match source.processor_stats("stopped") {
            Err(SourceError::StatsUnavailable(name)) => assert_eq!(name, "stopped"),
            other => panic!("expected StatsUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_stats_script_quotes_processor_names() {
        let script = MongoshSource::<RealCommandExecutor>::stats_script(&names(&["we\"ird'name", "b"]));
        assert!(script.contains(r#"["we\"ird'name","b"].map("#));
        assert!(script.contains("p.stats.call(p)"));
    }

    #[test]
    fn test_stats_batch_runs_one_process_for_all_processors() {
        let executor = ScriptedExecutor::new().respond(
            0,
            r#"[{"document":{"stats":{"memoryUsageBytes":1}}},{"document":{"stats":{"memoryUsageBytes":2}}},{"document":{"stats":{"memoryUsageBytes":3}}}]"#,
            "",
        );
        let source = MongoshSource::with_executor("mongosh", None, &executor);

        let results = source.processor_stats_batch(&names(&["a", "b", "c"]));

        let usage: Vec<_> = results
            .iter()
            .map(|r| r.as_ref().unwrap().memory_usage_bytes())
            .collect();
        assert_eq!(usage, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(executor.calls.borrow().len(), 1);
    }

    #[test]
    fn test_stats_batch_keeps_failures_per_processor() {
        let executor = ScriptedExecutor::new().respond(
            0,
            r#"[{"document":{"stats":{"memoryUsageBytes":10}}},null,{"error":"MongoServerError: processor not running"},{}]"#,
            "",
        );
        let source = MongoshSource::with_executor("mongosh", None, &executor);

        let mut results = source
            .processor_stats_batch(&names(&["ok", "nostats", "throws", "empty"]))
            .into_iter();

        assert_eq!(results.next().unwrap().unwrap().memory_usage_bytes(), Some(10));
        assert!(matches!(
            results.next().unwrap(),
            Err(SourceError::StatsUnavailable(name)) if name == "nostats"
        ));
        match results.next().unwrap() {
            Err(SourceError::Remote { processor, message }) => {
                assert_eq!(processor, "throws");
                assert!(message.contains("not running"));
            }
            other => panic!("expected Remote, got {:?}", other),
        }
        assert!(matches!(
            results.next().unwrap(),
            Err(SourceError::StatsUnavailable(_))
        ));
    }

    #[test]
    fn test_stats_batch_length_mismatch_fails_every_name() {
        let executor = ScriptedExecutor::new().respond(0, "[null]", "");
        let source = MongoshSource::with_executor("mongosh", None, &executor);

        let results = source.processor_stats_batch(&names(&["a", "b"]));

        assert_eq!(results.len(), 2);
        for result in results {
            match result {
                Err(SourceError::Remote { message, .. }) => {
                    assert!(message.contains("1 stats entries for 2 processors"))
                }
                other => panic!("expected Remote, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_stats_batch_command_failure_fails_every_name() {
        let executor = ScriptedExecutor::new().respond(1, "", "MongoServerError: unauthorized\n");
        let source = MongoshSource::with_executor("mongosh", None, &executor);

        let results = source.processor_stats_batch(&names(&["a", "b"]));

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| matches!(
            r,
            Err(SourceError::Remote { message, .. }) if message.contains("unauthorized")
        )));
        assert_eq!(executor.calls.borrow().len(), 1);
    }

    #[test]
    fn test_stats_batch_without_names_runs_nothing() {
        let executor = ScriptedExecutor::new();
        let source = MongoshSource::with_executor("mongosh", None, &executor);

        assert!(source.processor_stats_batch(&[]).is_empty());
        assert!(executor.calls.borrow().is_empty());
    }
}
