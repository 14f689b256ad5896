use super::*;
use crate::config::ScoringSettings;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

pub(super) fn controller_for(base_url: &str, form: FormId) -> EguiController {
    let mut config = AppConfig {
        scoring: ScoringSettings {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..ScoringSettings::default()
        },
        ..AppConfig::default()
    };
    config.ui.last_form = form;
    EguiController::new(config).unwrap()
}

/// Base URL of a port with nothing listening.
pub(super) fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Serve a single canned JSON response once `release` fires (or immediately
/// when it is `None`). The join handle yields the raw request body.
pub(super) fn serve_json_once(
    status: u16,
    body: &str,
    release: Option<Receiver<()>>,
) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request_body = read_request_body(&mut stream);
        if let Some(release) = release {
            let _ = release.recv_timeout(Duration::from_secs(5));
        }
        let response = format!(
            "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
        request_body
    });
    (format!("http://{addr}"), handle)
}

pub(super) fn release_channel() -> (mpsc::Sender<()>, Receiver<()>) {
    mpsc::channel()
}

fn read_request_body(stream: &mut impl Read) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let read = stream.read(&mut chunk).unwrap_or(0);
        if read == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..read]);
        let Some(header_end) = find_header_end(&buf) else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
        let length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= header_end + 4 + length {
            return String::from_utf8_lossy(&buf[header_end + 4..header_end + 4 + length])
                .into_owned();
        }
    }
    String::new()
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|window| window == b"\r\n\r\n")
}

/// Poll until the mounted form leaves `Submitting` or the attempts run out.
pub(super) fn wait_for_settle(controller: &mut EguiController) {
    for _ in 0..400 {
        controller.poll_background_jobs();
        if !controller.ui.form.is_submitting() {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
}

/// Poll until the worker channel has delivered the pending result.
pub(super) fn drain_for(controller: &mut EguiController, duration: Duration) {
    let steps = (duration.as_millis() / 5).max(1);
    for _ in 0..steps {
        controller.poll_background_jobs();
        thread::sleep(Duration::from_millis(5));
    }
}
