//! Fake tool-call CLI written to a temp dir.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;
use vgen_invoker::{ExecMode, InvokerConfig};

/// Checks the argv shape, then answers with the received payload as the
/// video "URL" so tests can see exactly what arrived.
const ECHO_PAYLOAD: &str = r##"
if [ "$#" -ne 7 ] || [ "$1" != "tool" ] || [ "$2" != "call" ] \
   || [ "$3" != "generate-video-from-script" ] || [ "$4" != "--server" ] \
   || [ "$5" != "invideo" ] || [ "$6" != "--input" ]; then
  echo "unexpected arguments: $*" >&2
  exit 64
fi
sleep 1
escaped=$(printf '%s' "$7" | sed 's/\\/\\\\/g; s/"/\\"/g')
printf '{"content":[{"text":"%s"}]}\n' "$escaped"
echo "debug: payload received" >&2
"##;

pub struct FakeTool {
    _dir: TempDir,
    pub path: PathBuf,
}

impl FakeTool {
    /// Write an executable `sh` script with the given body.
    pub fn with_script(body: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("fake-mcp-cli");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod script");
        Self { _dir: dir, path }
    }

    pub fn echo_payload() -> Self {
        Self::with_script(ECHO_PAYLOAD)
    }

    pub fn config(&self, mode: ExecMode) -> InvokerConfig {
        InvokerConfig::default()
            .with_tool_binary(self.path.to_string_lossy())
            .with_exec_mode(mode)
            .with_timeout(Some(Duration::from_secs(30)))
    }
}
