// ===============================
// src/metrics.rs
// ===============================
use once_cell::sync::Lazy;
use prometheus::core::Collector;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use tracing::{error, info};

// Single custom registry (we register everything here)
pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

// -------- Store actions --------
pub static STORE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("store_requests_total", "store actions (labels: store, action, outcome)"),
        &["store", "action", "outcome"],
    )
    .unwrap()
});

pub static STORE_IN_FLIGHT: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("store_in_flight", "requests currently in flight per store"),
        &["store"],
    )
    .unwrap()
});

// -------- Coordinator --------
pub static DEPENDENT_REFRESH: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("dependent_refresh_total", "refreshes fired after mutations (labels: resource, outcome)"),
        &["resource", "outcome"],
    )
    .unwrap()
});

pub static COORDINATOR_REJECTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("coordinator_rejected_total", "calls refused while unauthenticated")
        .unwrap()
});

pub static AUTH_RESETS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("auth_resets_total", "store resets triggered by logout")
        .unwrap()
});

/// Registers a collector; a second registration of the same collector is not an error.
fn register(registry: &Registry, c: Box<dyn Collector>) -> Result<(), prometheus::Error> {
    match registry.register(c) {
        Ok(()) | Err(prometheus::Error::AlreadyReg) => Ok(()),
        Err(e) => Err(e),
    }
}

pub fn init() {
    let collectors: [(&str, Box<dyn Collector>); 5] = [
        ("store_requests_total", Box::new(STORE_REQUESTS.clone())),
        ("store_in_flight", Box::new(STORE_IN_FLIGHT.clone())),
        ("dependent_refresh_total", Box::new(DEPENDENT_REFRESH.clone())),
        ("coordinator_rejected_total", Box::new(COORDINATOR_REJECTED.clone())),
        ("auth_resets_total", Box::new(AUTH_RESETS.clone())),
    ];
    for (name, c) in collectors {
        if let Err(e) = register(&REGISTRY, c) {
            error!(metric = name, error = %e, "metric registration failed");
        }
    }
}

// Encode all metrics in Prometheus text format
fn encode_metrics() -> Vec<u8> {
    let encoder = TextEncoder::new();
    let families = REGISTRY.gather();
    let mut buf = Vec::new();
    if encoder.encode(&families, &mut buf).is_err() || buf.is_empty() {
        buf.extend_from_slice(b"# no metrics\n");
    }
    buf
}

// Serve one HTTP request (GET / or /metrics): tiny HTTP 1.1 responder
fn handle_client(mut stream: TcpStream) {
    let mut _req_buf = [0u8; 1024];
    let _ = stream.read(&mut _req_buf);

    let body = encode_metrics();
    let header = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain; version=0.0.4; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );

    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(&body);
    let _ = stream.flush();
}

// Run the exporter in a dedicated OS thread (keeps Tokio runtime clean)
pub fn serve_metrics(port: u16) {
    thread::spawn(move || {
        let addr = format!("0.0.0.0:{port}");
        let listener = match TcpListener::bind(&addr) {
            Ok(l) => l,
            Err(e) => {
                error!(?e, %addr, "metrics bind failed");
                return;
            }
        };
        info!(%addr, "metrics listening (/ and /metrics)");

        for conn in listener.incoming() {
            match conn {
                Ok(stream) => handle_client(stream),
                Err(e) => error!(?e, "metrics accept error"),
            }
        }
    });
}
