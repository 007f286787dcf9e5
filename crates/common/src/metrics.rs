//! Process-wide Prometheus metrics.
//!
//! Counters live in a private registry so `/metrics` only exposes what this
//! service records.

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Leads captured, labelled by form type.
pub static LEADS_CAPTURED: Lazy<IntCounterVec> = Lazy::new(|| {
    register(IntCounterVec::new(
        Opts::new("site_leads_captured_total", "Lead form submissions persisted"),
        &["form_type"],
    ))
});

/// Upload attempts, labelled by outcome (`accepted` / `rejected`).
pub static UPLOADS: Lazy<IntCounterVec> = Lazy::new(|| {
    register(IntCounterVec::new(
        Opts::new("site_uploads_total", "Media upload attempts"),
        &["outcome"],
    ))
});

/// Admin login attempts, labelled by outcome (`success` / `failure`).
pub static ADMIN_LOGINS: Lazy<IntCounterVec> = Lazy::new(|| {
    register(IntCounterVec::new(
        Opts::new("site_admin_logins_total", "Admin login attempts"),
        &["outcome"],
    ))
});

/// Content writes, labelled by entity and operation.
pub static CONTENT_WRITES: Lazy<IntCounterVec> = Lazy::new(|| {
    register(IntCounterVec::new(
        Opts::new("site_content_writes_total", "Admin content create/update operations"),
        &["entity", "op"],
    ))
});

fn register(metric: prometheus::Result<IntCounterVec>) -> IntCounterVec {
    // metric names above are static and valid; a failure here is a programming error
    let metric = metric.unwrap_or_else(|e| panic!("invalid metric definition: {e}"));
    if let Err(e) = REGISTRY.register(Box::new(metric.clone())) {
        tracing::warn!(error = %e, "metric already registered");
    }
    metric
}

/// Touch every counter so they show up in the exposition before first use.
pub fn init() {
    Lazy::force(&LEADS_CAPTURED);
    Lazy::force(&UPLOADS);
    Lazy::force(&ADMIN_LOGINS);
    Lazy::force(&CONTENT_WRITES);
}

/// Render the registry in the Prometheus text format.
pub fn render() -> Result<String, prometheus::Error> {
    let mut buf = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_render_after_increment() {
        init();
        LEADS_CAPTURED.with_label_values(&["newsletter"]).inc();
        let text = render().expect("render");
        assert!(text.contains("site_leads_captured_total"));
        assert!(text.contains("form_type=\"newsletter\""));
    }
}
