/// Current time in seconds: wall clock natively, page time on the web
#[cfg(not(target_arch = "wasm32"))]
fn now_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

#[cfg(target_arch = "wasm32")]
fn now_secs() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|perf| perf.now() / 1000.0)
        .unwrap_or(0.0)
}

/// Measures how long an export takes, on native and wasm alike
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: f64,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self { started: now_secs() }
    }

    /// Seconds since [`Stopwatch::start`], never negative
    pub fn elapsed_secs(&self) -> f64 {
        (now_secs() - self.started).max(0.0)
    }
}
