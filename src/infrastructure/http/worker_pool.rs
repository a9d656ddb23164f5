//! Concurrency-bounded link validation stage.
//!
//! Checkable hrefs are fed through a fixed pool of worker tasks pulling from
//! a shared job channel. Each check runs inside its own spawned task with its
//! own timeout and error boundary, so one slow or panicking check only holds
//! its own slot. The stage completes when every submitted job has reported;
//! there is no global timeout and no early cancellation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};

use crate::domain::entities::{CTAElement, ErrorCategory, LinkCheck};
use crate::domain::link_probe::LinkProbe;
use crate::utils::url_classifier::{UrlClass, classify};

struct CheckJob {
    /// Index into the snapshot, used to reattach the result.
    index: usize,
    element_id: String,
    url: String,
}

/// Validates every checkable destination in the snapshot.
///
/// Returns the same elements, in the same order, with link fields populated
/// for every element that carried a non-empty href on a link or button.
/// Elements without a checkable destination pass through untouched.
pub async fn validate_links(
    mut elements: Vec<CTAElement>,
    probe: Arc<dyn LinkProbe>,
    workers: usize,
    timeout: Duration,
) -> Vec<CTAElement> {
    let mut jobs = Vec::new();

    for (index, element) in elements.iter_mut().enumerate() {
        if !element.is_link_like() {
            continue;
        }
        let href = element.href.clone().unwrap_or_default();

        match classify(&href) {
            UrlClass::Skip(reason) => {
                debug!(element_id = %element.element_id, %reason, "link not checkable");
                element.link = Some(LinkCheck::skipped(reason));
            }
            UrlClass::Checkable => jobs.push(CheckJob {
                index,
                element_id: element.element_id.clone(),
                url: href,
            }),
        }
    }

    if jobs.is_empty() {
        info!("no links to validate");
        return elements;
    }

    let total = jobs.len();
    let workers = workers.max(1).min(total);
    info!(total, workers, "validating links");

    let (job_tx, job_rx) = mpsc::channel::<CheckJob>(total);
    let (result_tx, mut result_rx) = mpsc::channel::<(usize, LinkCheck)>(total);
    let job_rx = Arc::new(Mutex::new(job_rx));

    for job in jobs {
        // Capacity equals the job count, so sends cannot fail.
        let _ = job_tx.send(job).await;
    }
    drop(job_tx);

    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        handles.push(tokio::spawn(run_check_worker(
            Arc::clone(&job_rx),
            result_tx.clone(),
            Arc::clone(&probe),
            timeout,
        )));
    }
    drop(result_tx);

    let mut received = 0usize;
    while let Some((index, check)) = result_rx.recv().await {
        elements[index].link = Some(check);
        received += 1;
    }
    for handle in handles {
        let _ = handle.await;
    }

    // Workers report every job they consume, including failed ones; a
    // missing result would mean a worker died before draining its queue.
    if received < total {
        warn!(received, total, "validation stage lost results");
        for element in elements.iter_mut() {
            if element.is_link_like() && element.link.is_none() {
                element.link = Some(LinkCheck::failed(ErrorCategory::TaskFailed, None, None));
            }
        }
    }

    elements
}

/// One pool worker: pulls jobs until the queue closes, runs each check in a
/// child task so a panic is contained, and reports exactly one result per
/// job.
async fn run_check_worker(
    jobs: Arc<Mutex<mpsc::Receiver<CheckJob>>>,
    results: mpsc::Sender<(usize, LinkCheck)>,
    probe: Arc<dyn LinkProbe>,
    timeout: Duration,
) {
    loop {
        let job = {
            let mut rx = jobs.lock().await;
            rx.recv().await
        };
        let Some(job) = job else { break };

        let check = {
            let probe = Arc::clone(&probe);
            let url = job.url.clone();
            let handle =
                tokio::spawn(
                    async move { tokio::time::timeout(timeout, probe.fetch(&url)).await },
                );
            match handle.await {
                Ok(Ok(outcome)) => outcome_to_check(&job.url, outcome),
                Ok(Err(_elapsed)) => LinkCheck::failed(ErrorCategory::Timeout, None, None),
                Err(join_err) => {
                    warn!(element_id = %job.element_id, error = %join_err, "link check task failed");
                    LinkCheck::failed(ErrorCategory::TaskFailed, None, None)
                }
            }
        };

        if let Some(err) = check.error {
            debug!(element_id = %job.element_id, url = %job.url, %err, "link check failed");
        } else {
            debug!(element_id = %job.element_id, url = %job.url, status = ?check.status, "link checked");
        }

        if results.send((job.index, check)).await.is_err() {
            break;
        }
    }
}

fn outcome_to_check(
    original_url: &str,
    outcome: Result<crate::domain::link_probe::ProbeResponse, ErrorCategory>,
) -> LinkCheck {
    match outcome {
        Ok(response) => match response.status {
            200..=399 => {
                let redirect = (response.final_url != original_url).then_some(response.final_url);
                LinkCheck::valid(response.status, redirect, response.elapsed)
            }
            404 => LinkCheck::failed(
                ErrorCategory::NotFound,
                Some(404),
                Some(response.elapsed),
            ),
            403 => LinkCheck::failed(
                ErrorCategory::Forbidden,
                Some(403),
                Some(response.elapsed),
            ),
            500 => LinkCheck::failed(
                ErrorCategory::ServerError,
                Some(500),
                Some(response.elapsed),
            ),
            status => LinkCheck::failed(
                ErrorCategory::HttpStatus(status),
                Some(status),
                Some(response.elapsed),
            ),
        },
        Err(category) => LinkCheck::failed(category, None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ElementType, LinkValidity, Position, Size, SkipReason};
    use crate::domain::link_probe::{MockLinkProbe, ProbeResponse};
    use async_trait::async_trait;

    /// Probe that sleeps per URL before answering, for pool-timing tests.
    /// The automock answers synchronously, which is fine everywhere except
    /// where latency is the thing under test.
    struct DelayedProbe {
        delay_for: fn(&str) -> Duration,
    }

    #[async_trait]
    impl LinkProbe for DelayedProbe {
        async fn fetch(&self, url: &str) -> Result<ProbeResponse, ErrorCategory> {
            tokio::time::sleep((self.delay_for)(url)).await;
            Ok(ok_response(url, 200))
        }
    }

    fn link(id: &str, href: Option<&str>) -> CTAElement {
        CTAElement {
            element_id: id.to_string(),
            css_selector: ".cta".to_string(),
            element_type: ElementType::Link,
            text: "Docs".to_string(),
            aria_label: None,
            role: None,
            tabindex: None,
            position: Position::default(),
            size: Size {
                width: 100,
                height: 44,
            },
            z_index: None,
            html_id: None,
            html_class: None,
            text_color: None,
            background_color: None,
            href: href.map(str::to_string),
            link: None,
            is_visible: true,
            is_hidden: false,
            is_dropdown: false,
            is_js_generated: false,
            has_onclick: false,
        }
    }

    fn ok_response(url: &str, status: u16) -> ProbeResponse {
        ProbeResponse {
            status,
            final_url: url.to_string(),
            elapsed: 0.1,
        }
    }

    #[tokio::test]
    async fn test_javascript_href_never_reaches_the_probe() {
        let mut probe = MockLinkProbe::new();
        probe.expect_fetch().times(0);

        let elements = vec![link("cta_1", Some("javascript:void(0)"))];
        let out = validate_links(elements, Arc::new(probe), 5, Duration::from_secs(10)).await;

        let check = out[0].link.as_ref().unwrap();
        assert_eq!(check.validity, LinkValidity::Unknown);
        assert_eq!(check.skip, Some(SkipReason::JavascriptScheme));
    }

    #[tokio::test]
    async fn test_non_link_elements_pass_through_untouched() {
        let mut probe = MockLinkProbe::new();
        probe.expect_fetch().times(0);

        let mut form = link("cta_1", Some("https://example.com/post"));
        form.element_type = ElementType::Form;
        let bare = link("cta_2", None);

        let out = validate_links(vec![form, bare], Arc::new(probe), 5, Duration::from_secs(10)).await;
        assert!(out[0].link.is_none());
        assert!(out[1].link.is_none());
    }

    #[tokio::test]
    async fn test_statuses_classify_into_categories() {
        let mut probe = MockLinkProbe::new();
        probe.expect_fetch().returning(|url| {
            let status = match url {
                "https://example.com/ok" => 200,
                "https://example.com/missing" => 404,
                "https://example.com/locked" => 403,
                "https://example.com/boom" => 500,
                _ => 418,
            };
            Ok(ok_response(url, status))
        });

        let elements = vec![
            link("cta_1", Some("https://example.com/ok")),
            link("cta_2", Some("https://example.com/missing")),
            link("cta_3", Some("https://example.com/locked")),
            link("cta_4", Some("https://example.com/boom")),
            link("cta_5", Some("https://example.com/teapot")),
        ];
        let out = validate_links(elements, Arc::new(probe), 5, Duration::from_secs(10)).await;

        assert_eq!(out[0].link.as_ref().unwrap().validity, LinkValidity::Valid);
        assert_eq!(
            out[1].link.as_ref().unwrap().error,
            Some(ErrorCategory::NotFound)
        );
        assert_eq!(
            out[2].link.as_ref().unwrap().error,
            Some(ErrorCategory::Forbidden)
        );
        assert_eq!(
            out[3].link.as_ref().unwrap().error,
            Some(ErrorCategory::ServerError)
        );
        assert_eq!(
            out[4].link.as_ref().unwrap().error,
            Some(ErrorCategory::HttpStatus(418))
        );
    }

    #[tokio::test]
    async fn test_redirect_recorded_when_final_url_differs() {
        let mut probe = MockLinkProbe::new();
        probe.expect_fetch().returning(|_| {
            Ok(ProbeResponse {
                status: 200,
                final_url: "https://example.com/landing/".to_string(),
                elapsed: 0.2,
            })
        });

        let elements = vec![link("cta_1", Some("https://example.com/landing"))];
        let out = validate_links(elements, Arc::new(probe), 5, Duration::from_secs(10)).await;

        let check = out[0].link.as_ref().unwrap();
        assert_eq!(check.validity, LinkValidity::Valid);
        assert_eq!(
            check.redirect_url.as_deref(),
            Some("https://example.com/landing/")
        );
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_the_batch() {
        let mut probe = MockLinkProbe::new();
        probe.expect_fetch().returning(|url| {
            if url.ends_with("/2") {
                Err(ErrorCategory::Connection)
            } else {
                Ok(ok_response(url, 200))
            }
        });

        let elements: Vec<CTAElement> = (0..6)
            .map(|i| link(&format!("cta_{i}"), Some(&format!("https://example.com/{i}"))))
            .collect();
        let out = validate_links(elements, Arc::new(probe), 5, Duration::from_secs(10)).await;

        assert_eq!(out.len(), 6);
        for (i, element) in out.iter().enumerate() {
            let check = element.link.as_ref().unwrap();
            if i == 2 {
                assert_eq!(check.error, Some(ErrorCategory::Connection));
            } else {
                assert_eq!(check.validity, LinkValidity::Valid);
            }
        }
    }

    #[tokio::test]
    async fn test_pool_attributes_results_under_mixed_latencies() {
        // Earlier jobs sleep longer, so completion order inverts submission
        // order.
        let probe = DelayedProbe {
            delay_for: |url| {
                let n: u64 = url.rsplit('/').next().unwrap().parse().unwrap();
                Duration::from_millis((10 - n) * 5)
            },
        };

        let elements: Vec<CTAElement> = (0..10)
            .map(|i| link(&format!("cta_{i}"), Some(&format!("https://example.com/{i}"))))
            .collect();
        let out = validate_links(elements, Arc::new(probe), 5, Duration::from_secs(10)).await;

        assert_eq!(out.len(), 10);
        for (i, element) in out.iter().enumerate() {
            assert_eq!(element.element_id, format!("cta_{i}"));
            assert_eq!(
                element.link.as_ref().unwrap().validity,
                LinkValidity::Valid,
                "element {i} missing its result"
            );
        }
    }

    #[tokio::test]
    async fn test_slow_check_times_out_without_blocking_others() {
        let probe = DelayedProbe {
            delay_for: |url| {
                if url.ends_with("/slow") {
                    Duration::from_secs(60)
                } else {
                    Duration::ZERO
                }
            },
        };

        let elements = vec![
            link("cta_0", Some("https://example.com/slow")),
            link("cta_1", Some("https://example.com/fast")),
        ];
        let out = validate_links(elements, Arc::new(probe), 5, Duration::from_millis(100)).await;

        assert_eq!(
            out[0].link.as_ref().unwrap().error,
            Some(ErrorCategory::Timeout)
        );
        assert_eq!(out[1].link.as_ref().unwrap().validity, LinkValidity::Valid);
    }
}
