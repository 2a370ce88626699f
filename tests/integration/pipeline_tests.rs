use async_trait::async_trait;
use contact_sieve::config::Config;
use contact_sieve::crawler::{build_strategies, run_harvest, Coordinator, FetchStrategy};
use contact_sieve::output::{EmailSummary, OutputResult, ResultSink, SiteResult, XlsxSink};
use contact_sieve::{FetchError, ScoreMapping};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Sink that keeps rows in memory for inspection
#[derive(Clone, Default)]
struct MemorySink {
    rows: Arc<Mutex<Vec<SiteResult>>>,
}

impl ResultSink for MemorySink {
    fn append(&mut self, row: &SiteResult) -> OutputResult<()> {
        self.rows.lock().unwrap().push(row.clone());
        Ok(())
    }
}

/// Stand-in for the browser fallback that never finds anything
struct EmptyFallback {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl FetchStrategy for EmptyFallback {
    fn name(&self) -> &'static str {
        "empty-fallback"
    }

    async fn fetch(&self, _url: &Url) -> Result<ScoreMapping, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ScoreMapping::new())
    }
}

/// Creates a test configuration without the browser and without pacing
fn create_test_config(xlsx_path: &str) -> Config {
    let mut config = Config::default();
    config.output.xlsx_path = xlsx_path.to_string();
    config.render.enabled = false;
    config.pacing.site_delay_ms = 0;
    config.fetch.timeout_secs = 2;
    config.fetch.link_timeout_secs = 1;
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "text/html")
}

/// Direct strategy from config plus a counting empty fallback
fn strategies_with_fallback(config: &Config) -> (Vec<Box<dyn FetchStrategy>>, Arc<AtomicUsize>) {
    let mut strategies = build_strategies(config).expect("Failed to build strategies");
    let calls = Arc::new(AtomicUsize::new(0));
    strategies.push(Box::new(EmptyFallback {
        calls: Arc::clone(&calls),
    }));
    (strategies, calls)
}

async fn mount_org_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><body>
                <h1>Riverside Food Shelf</h1>
                <p>General questions: info@riverside-food.org</p>
                <a href="/about-us">About</a>
                <a href="/contact">Contact</a>
                <a href="/donate">Donate</a>
                <a href="https://twitter.com/riverside/about">Twitter</a>
                <img src="/static/hero@2x.png" alt="Volunteers">
                <script>
                    Sentry.init({dsn: "https://0123456789abcdef0123@sentry.wixpress.com/1"})
                </script>
            </body></html>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about-us"))
        .respond_with(html(
            r#"<p>Board chair:
               <a href="mailto:Chair.Office@Riverside-Food.org?subject=Hello">email</a></p>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html(r#"<img src="/email.png" alt="director@riverside-food.org">"#))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/donate"))
        .respond_with(html("<p>giving@riverside-food.org</p>"))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_site_ranked_across_linked_pages() {
    let server = MockServer::start().await;
    mount_org_site(&server).await;

    let config = create_test_config("unused.xlsx");
    let (strategies, fallback_calls) = strategies_with_fallback(&config);
    let sink = MemorySink::default();
    let mut coordinator = Coordinator::with_parts(config, strategies, Box::new(sink.clone()));

    let row = coordinator.process_site(1, &format!("{}/", server.uri())).await;

    // Both linked-page emails got the +3 contact/about bonus; the generic
    // mailbox on the home page scored -1 and is left out.
    assert_eq!(
        row.summary,
        EmailSummary::Found(vec![
            "chair.office@riverside-food.org".to_string(),
            "director@riverside-food.org".to_string(),
        ])
    );
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    assert_eq!(sink.rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_contact_page_text_and_alt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html(
            "Contact us at Sales@Example.com or see image alt='backup@example.com'",
        ))
        .mount(&server)
        .await;

    let config = create_test_config("unused.xlsx");
    let strategies = build_strategies(&config).unwrap();
    let mut coordinator =
        Coordinator::with_parts(config, strategies, Box::new(MemorySink::default()));

    let url = Url::parse(&format!("{}/contact", server.uri())).unwrap();
    let emails = coordinator.discover(&url).await;

    // Served from 127.0.0.1, so only the contact-page bonus and the generic
    // mailbox penalty apply here.
    assert_eq!(emails.get("sales@example.com"), Some(2));
    assert_eq!(emails.get("backup@example.com"), Some(3));
    assert_eq!(emails.top(2), vec!["backup@example.com", "sales@example.com"]);
}

#[tokio::test]
async fn test_unreachable_site_falls_back_and_reports_no_email() {
    let config = create_test_config("unused.xlsx");
    let (strategies, fallback_calls) = strategies_with_fallback(&config);
    let sink = MemorySink::default();
    let mut coordinator = Coordinator::with_parts(config, strategies, Box::new(sink.clone()));

    let row = coordinator.process_site(1, "http://127.0.0.1:9/").await;

    assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
    assert_eq!(row.summary.to_string(), "No email found");
    assert_eq!(coordinator.statistics().strategy_failures, 1);
}

#[tokio::test]
async fn test_empty_direct_result_triggers_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(r#"<div id="app"></div><script src="/bundle.js"></script>"#))
        .mount(&server)
        .await;

    let config = create_test_config("unused.xlsx");
    let (strategies, fallback_calls) = strategies_with_fallback(&config);
    let mut coordinator =
        Coordinator::with_parts(config, strategies, Box::new(MemorySink::default()));

    let row = coordinator.process_site(1, &server.uri()).await;

    assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
    assert_eq!(row.summary, EmailSummary::NoEmailsFound);
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let server = MockServer::start().await;
    mount_org_site(&server).await;

    let mut summaries = Vec::new();
    for _ in 0..2 {
        let config = create_test_config("unused.xlsx");
        let strategies = build_strategies(&config).unwrap();
        let mut coordinator =
            Coordinator::with_parts(config, strategies, Box::new(MemorySink::default()));
        let row = coordinator.process_site(1, &server.uri()).await;
        summaries.push(row.summary.to_string());
    }

    assert_eq!(summaries[0], summaries[1]);
}

#[tokio::test]
async fn test_full_run_writes_workbook() {
    let server = MockServer::start().await;
    mount_org_site(&server).await;

    let dir = TempDir::new().unwrap();
    let xlsx_path = dir.path().join("results.xlsx");
    let config = create_test_config(xlsx_path.to_str().unwrap());

    let urls = vec![
        format!("{}/", server.uri()),
        "http://127.0.0.1:9/".to_string(),
    ];
    let stats = run_harvest(config, &urls).await.expect("Run failed");

    assert!(xlsx_path.exists());
    assert_eq!(stats.sites_processed, 2);
    assert_eq!(stats.sites_with_emails, 1);
    assert_eq!(stats.emails_reported, 2);
    assert_eq!(stats.sink_failures, 0);
}

#[tokio::test]
async fn test_unwritable_workbook_does_not_stop_run() {
    let config = create_test_config("/nonexistent-dir/results.xlsx");
    let urls = vec![
        "http://127.0.0.1:9/".to_string(),
        "http://127.0.0.1:9/other".to_string(),
    ];

    let stats = run_harvest(config, &urls).await.expect("Run failed");

    // Both sites are still visited; each row and the final pass fail to save
    assert_eq!(stats.sites_processed, 2);
    assert_eq!(stats.strategy_failures, 2);
    assert_eq!(stats.sink_failures, 3);
}

#[tokio::test]
async fn test_second_run_appends_to_workbook() {
    let server = MockServer::start().await;
    mount_org_site(&server).await;

    let dir = TempDir::new().unwrap();
    let xlsx_path = dir.path().join("results.xlsx");
    let urls = vec![format!("{}/", server.uri())];

    for _ in 0..2 {
        let config = create_test_config(xlsx_path.to_str().unwrap());
        let stats = run_harvest(config, &urls).await.expect("Run failed");
        assert_eq!(stats.sink_failures, 0);
    }

    let sink = XlsxSink::open(&xlsx_path, "Email_Results").unwrap();
    assert_eq!(sink.rows().len(), 2);
    assert_eq!(sink.rows()[0], sink.rows()[1]);
}
