use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, TcpListener};
use std::thread::JoinHandle;
use std::time::Duration;

use askroom_api::Run;
use askroom_infrastructure::app::http::HttpServerConfig;
use askroom_infrastructure::InfrastructureConfig;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::runtime::Runtime;
use tokio::select;
use tokio::sync::oneshot;

/// Runs the server on its own runtime, until dropped.
struct Runner {
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<anyhow::Result<()>>>,
}

impl Runner {
    fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        let (tx, rx) = oneshot::channel::<()>();

        let handle = std::thread::spawn(move || {
            let runtime = Runtime::new().unwrap();
            runtime.block_on(async {
                select! {
                    result = f() => result,
                    _ = rx => Ok(()),
                }
            })
        });

        Self {
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap().unwrap();
        }
    }
}

struct Context {
    port: u16,
    client: reqwest::Client,
    _dist: tempfile::TempDir,
    _runner: Runner,
}

impl Context {
    fn url(&self, path: &str) -> String {
        format!("http://localhost:{}{path}", self.port)
    }

    async fn post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client.post(self.url(path)).form(form).send().await.unwrap()
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }
}

async fn start() -> Context {
    let _ = env_logger::try_init();

    let dist = tempfile::tempdir().unwrap();
    std::fs::write(dist.path().join("index.html"), "<html>askroom</html>").unwrap();
    std::fs::create_dir(dist.path().join("static")).unwrap();
    std::fs::write(dist.path().join("static").join("main.css"), "body {}").unwrap();

    let listener = TcpListener::bind("localhost:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let run = Run {
        bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        dist: dist.path().to_path_buf(),
        http: HttpServerConfig::default(),
        infra: InfrastructureConfig::default(),
    };

    let runner = Runner::spawn(move || async move {
        let code = run.run(Some(listener)).await?;
        println!("API exited with code {code:?}");
        Ok::<_, anyhow::Error>(())
    });

    let context = Context {
        port,
        client: reqwest::Client::new(),
        _dist: dist,
        _runner: runner,
    };

    // wait until it's up
    loop {
        if let Ok(response) = context.client.get(context.url("/api/v1/listRooms")).send().await {
            if response.status() == StatusCode::OK {
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    context
}

#[tokio::test]
async fn question_lifecycle() {
    let context = start().await;

    let response = context.post("/api/v1/createRoom", &[("roomName", "Retro")]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["status"], "ok");
    let owner = created["uID"].as_str().unwrap().to_string();

    let rooms: Value = context.get("/api/v1/listRooms").await.json().await.unwrap();
    assert_eq!(rooms, json!({"rooms": ["retro"]}));

    let registered: Value = context.post("/api/v1/register/retro", &[]).await.json().await.unwrap();
    let user = registered["id"].as_str().unwrap().to_string();
    assert_ne!(user, owner);

    let response = context
        .post(
            "/api/v1/publishQuestion/retro",
            &[("uID", user.as_str()), ("question", "What went well?")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let published: Value = response.json().await.unwrap();
    let id = published["id"].as_u64().unwrap().to_string();

    let voted: Value = context
        .post("/api/v1/vote/retro", &[("uID", owner.as_str()), ("qID", id.as_str()), ("val", "1")])
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(voted, json!({"status": "ok", "newCt": 1}));

    // values in the query work as well
    let response = context
        .client
        .post(context.url(&format!("/api/v1/vote/retro?uID={user}&qID={id}&val=1")))
        .send()
        .await
        .unwrap();
    let voted: Value = response.json().await.unwrap();
    assert_eq!(voted["newCt"], 2);

    let response = context.post("/api/v1/closeRoom/retro", &[("uID", owner.as_str())]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = context
        .post(
            "/api/v1/publishQuestion/retro",
            &[("uID", user.as_str()), ("question", "Anything else?")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let status: Value = response.json().await.unwrap();
    assert_eq!(status, json!({"status": "The room has been closed"}));

    let questions: Value = context.get("/api/v1/getQuestions/retro").await.json().await.unwrap();
    assert_eq!(
        questions,
        json!({
            "questions": [{"id": id.parse::<u64>().unwrap(), "q": "What went well?", "vote": 2}],
            "is_closed": true,
        })
    );
}

#[tokio::test]
async fn web_client() {
    let context = start().await;

    for (path, status) in [
        ("/", StatusCode::OK),
        ("/retro", StatusCode::OK),
        ("/retro/extra", StatusCode::NOT_FOUND),
    ] {
        let response = context.get(path).await;
        assert_eq!(response.status(), status, "for {path}");
        assert_eq!(response.text().await.unwrap(), "<html>askroom</html>");
    }

    let response = context.get("/static/main.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "body {}");

    let response = context.get("/api/v1/nothing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let version: Value = context.get("/.well-known/askroom/version").await.json().await.unwrap();
    assert_eq!(version["name"], "askroom-api");
}
