use serde_json::{Value, json};
use uuid::Uuid;

mod storage;
mod unit;

const BASE_URL: &str = "http://127.0.0.1:8000";

struct Session {
    client: reqwest::Client,
    token: String,
}

impl Session {
    async fn register_and_login(client: &reqwest::Client) -> Self {
        let suffix = &Uuid::new_v4().simple().to_string()[..8];
        let username = format!("user_{}", suffix);
        let email = format!("{}@example.com", username);

        let response = client
            .post(format!("{}/auth/register", BASE_URL))
            .json(&json!({
                "username": username,
                "email": email,
                "first_name": "Test",
                "last_name": "User",
                "password": "Sprint2024!",
                "confirm_password": "Sprint2024!"
            }))
            .send()
            .await
            .expect("register request");
        assert_eq!(response.status(), 201);

        let body: Value = client
            .post(format!("{}/auth/login", BASE_URL))
            .json(&json!({ "email": email, "password": "Sprint2024!" }))
            .send()
            .await
            .expect("login request")
            .json()
            .await
            .expect("login body");

        Self {
            client: client.clone(),
            token: body["data"]["access_token"]
                .as_str()
                .expect("access token")
                .to_string(),
        }
    }

    async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let response = self
            .client
            .post(format!("{}{}", BASE_URL, path))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .expect("request");
        let status = response.status().as_u16();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let response = self
            .client
            .get(format!("{}{}", BASE_URL, path))
            .bearer_auth(&self.token)
            .send()
            .await
            .expect("request");
        let status = response.status().as_u16();
        (status, response.json().await.unwrap_or(Value::Null))
    }
}

fn id(body: &Value) -> String {
    body["data"]["id"].as_str().expect("id in response").to_string()
}

#[tokio::test]
#[ignore = "requires running server"]
async fn protected_routes_require_a_token() {
    let response = reqwest::get(format!("{}/teams", BASE_URL))
        .await
        .expect("request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn full_hierarchy_flow_with_outsider() {
    let client = reqwest::Client::new();
    let owner = Session::register_and_login(&client).await;
    let outsider = Session::register_and_login(&client).await;

    let (status, team) = owner
        .post(
            "/teams",
            json!({ "name": format!("team-{}", Uuid::new_v4().simple()) }),
        )
        .await;
    assert_eq!(status, 201);

    let (status, workspace) = owner
        .post("/workspaces", json!({ "team_id": id(&team), "title": "Roadmap" }))
        .await;
    assert_eq!(status, 201);

    let now = chrono::Utc::now();
    let (status, project) = owner
        .post(
            "/projects",
            json!({
                "workspace_id": id(&workspace),
                "title": "Checkout",
                "ended_at": now + chrono::Duration::days(60),
                "deadline": now + chrono::Duration::days(45)
            }),
        )
        .await;
    assert_eq!(status, 201);

    let (status, sprint) = owner
        .post(
            "/sprints",
            json!({ "project_id": id(&project), "ended_at": now + chrono::Duration::days(14) }),
        )
        .await;
    assert_eq!(status, 201);

    let (status, task) = owner
        .post(
            "/tasks",
            json!({ "sprint_id": id(&sprint), "title": "Payment form" }),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(task["data"]["status"], "ToDo");

    let (status, _) = outsider.get(&format!("/tasks/{}", id(&task))).await;
    assert_eq!(status, 403);

    let (status, _) = outsider
        .post("/workspaces", json!({ "team_id": id(&team), "title": "Intruder" }))
        .await;
    assert_eq!(status, 403);

    let (status, body) = owner
        .post("/sprints", json!({ "project_id": id(&project) }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);

    let (status, work_time) = owner
        .post("/work-times", json!({ "task_id": id(&task) }))
        .await;
    assert_eq!(status, 201);

    let complete = format!("/work-times/{}/complete", id(&work_time));
    let (status, body) = owner
        .post(&complete, json!({ "ended_at": "not-a-timestamp" }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["errors"][0]["field"], "ended_at");
    let (status, _) = owner.post(&complete, json!({})).await;
    assert_eq!(status, 200);

    let (status, _) = outsider
        .post(
            "/sprints",
            json!({ "project_id": id(&project), "ended_at": now + chrono::Duration::days(7) }),
        )
        .await;
    assert_eq!(status, 403);

    let (status, tasks) = owner
        .get(&format!("/sprints/{}/tasks?status=ToDo", id(&sprint)))
        .await;
    assert_eq!(status, 200);
    assert_eq!(tasks["meta"]["total_count"], 1);
}
