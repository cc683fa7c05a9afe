//! Shared test infrastructure for integration tests.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::thread::{self, JoinHandle};
use tempfile::TempDir;

pub const ALEX_DOE: &str = r#"{
    "results": [
        {
            "gender": "male",
            "name": { "title": "Mr", "first": "Alex", "last": "Doe" },
            "email": "alex.doe@example.com"
        }
    ],
    "info": { "seed": "fixture", "results": 1, "page": 1, "version": "1.4" }
}"#;

pub const NO_RESULTS: &str = r#"{"results": [], "info": {"results": 0}}"#;

/// One-shot HTTP server on loopback that answers a single request.
pub struct CannedServer {
    pub url: String,
    handle: JoinHandle<String>,
}

impl CannedServer {
    pub fn start(status: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let port = listener.local_addr().expect("local addr").port();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("read request line");
            loop {
                let mut header = String::new();
                let read = reader.read_line(&mut header).expect("read header");
                if read == 0 || header == "\r\n" {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).expect("write response");
            stream.flush().expect("flush response");
            request_line
        });
        Self {
            url: format!("http://127.0.0.1:{port}/api/"),
            handle,
        }
    }

    /// Wait for the request and return its request line.
    #[allow(dead_code)]
    pub fn request_line(self) -> String {
        self.handle.join().expect("server thread")
    }
}

/// Runs the built binary with an isolated, empty config file.
pub struct Cli {
    _config_dir: TempDir,
    config_path: PathBuf,
}

impl Default for Cli {
    fn default() -> Self {
        Self::with_config("{}")
    }
}

impl Cli {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(contents: &str) -> Self {
        let config_dir = tempfile::tempdir().expect("create temp dir");
        let config_path = config_dir.path().join("config.json");
        std::fs::write(&config_path, contents).expect("write config");
        Self {
            _config_dir: config_dir,
            config_path,
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_coffeetbl"));
        command
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env_remove("COFFEETBL_ENDPOINT")
            .env_remove("COFFEETBL_TIMEOUT_SECS")
            .env_remove("RUST_LOG");
        for proxy in ["HTTP_PROXY", "HTTPS_PROXY", "ALL_PROXY", "http_proxy", "https_proxy", "all_proxy"] {
            command.env_remove(proxy);
        }
        command
    }

    #[allow(dead_code)]
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("run coffeetbl")
    }

    #[allow(dead_code)]
    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn coffeetbl");
        child
            .stdin
            .take()
            .expect("child stdin")
            .write_all(stdin.as_bytes())
            .expect("write stdin");
        child.wait_with_output().expect("wait for coffeetbl")
    }
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
