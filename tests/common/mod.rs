//! Shared fixtures. Each test file compiles its own copy of this module.

#![allow(dead_code)]

use palette_check::{
    engine::{AnalysisService, ImagePayload, ServiceStatus},
    error::{PaletteError, Result},
    model::{Color, ColorRuleResult, ColorShare, RuleDetails},
};
use std::cell::{Cell, RefCell};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

pub const SCENARIO_JSON: &str = r#"{
  "primary_color": {"color": [10, 20, 30], "percentage": 55.5},
  "secondary_color": {"color": [40, 50, 60], "percentage": 30.0},
  "accent_color": {"color": [70, 80, 90], "percentage": 14.5},
  "rule_followed": true,
  "details": {"primary_ok": true, "secondary_ok": true, "accent_ok": true}
}"#;

pub fn scenario_result() -> ColorRuleResult {
    ColorRuleResult {
        primary_color: ColorShare {
            color: Color::new(10, 20, 30),
            percentage: 55.5,
        },
        secondary_color: ColorShare {
            color: Color::new(40, 50, 60),
            percentage: 30.0,
        },
        accent_color: ColorShare {
            color: Color::new(70, 80, 90),
            percentage: 14.5,
        },
        rule_followed: true,
        details: RuleDetails {
            primary_ok: true,
            secondary_ok: true,
            accent_ok: true,
        },
    }
}

pub fn png(name: &str) -> ImagePayload {
    ImagePayload::new(name, vec![0x89, b'P', b'N', b'G', 1, 2, 3])
}

/// Service stub replaying queued outcomes in order.
#[derive(Default)]
pub struct FakeService {
    outcomes: RefCell<Vec<std::result::Result<ColorRuleResult, String>>>,
    pub calls: Cell<usize>,
    pub last_test_id: RefCell<Option<String>>,
}

impl FakeService {
    pub fn new(outcomes: Vec<std::result::Result<ColorRuleResult, String>>) -> Self {
        let mut outcomes = outcomes;
        outcomes.reverse();
        Self {
            outcomes: RefCell::new(outcomes),
            ..Default::default()
        }
    }
}

impl AnalysisService for FakeService {
    fn status(&self) -> Result<ServiceStatus> {
        Ok(ServiceStatus {
            base_url: "fake".into(),
            reachable: true,
            http_status: Some(200),
            error: None,
        })
    }

    fn analyze(&self, test_id: &str, _payload: &ImagePayload) -> Result<ColorRuleResult> {
        self.calls.set(self.calls.get() + 1);
        *self.last_test_id.borrow_mut() = Some(test_id.to_string());
        match self.outcomes.borrow_mut().pop() {
            Some(Ok(r)) => Ok(r),
            Some(Err(reason)) => Err(PaletteError::AnalysisFailed(reason)),
            None => Err(PaletteError::AnalysisFailed("no outcome queued".into())),
        }
    }
}

/// One-shot HTTP server: accepts a single connection, captures the raw
/// request and answers with `status` and `body`.
pub struct StubServer {
    pub base_url: String,
    handle: JoinHandle<Vec<u8>>,
}

impl StubServer {
    pub fn start(status: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let base_url = format!("http://{}", listener.local_addr().expect("addr"));
        let status = status.to_string();
        let body = body.to_string();
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write");
            stream.flush().ok();
            request
        });
        Self { base_url, handle }
    }

    /// Waits for the served request and returns it.
    pub fn request(self) -> String {
        let raw = self.handle.join().expect("stub server thread");
        String::from_utf8_lossy(&raw).into_owned()
    }
}

fn read_request(stream: &mut std::net::TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        if let Some(end) = find(&buf, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let body_len = buf.len() - (end + 4);
            let content_length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok());
            match content_length {
                Some(n) if body_len >= n => break,
                None if !head.contains("transfer-encoding: chunked") => break,
                None if buf.ends_with(b"0\r\n\r\n") => break,
                _ => {}
            }
        }
        let n = stream.read(&mut chunk).expect("read");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    buf
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
