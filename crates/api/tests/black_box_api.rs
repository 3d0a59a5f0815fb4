use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};

use workforce_api::app::{build_router, AppServices};
use workforce_companies::NewCompany;
use workforce_core::CompanyId;
use workforce_employees::NewEmployee;
use workforce_infra::{
    CompanyRepository, EmployeeRepository, InMemoryCompanyRepository, InMemoryEmployeeRepository,
};

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    employees: Arc<InMemoryEmployeeRepository>,
    companies: Arc<InMemoryCompanyRepository>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory stores, ephemeral port.
        let employees = Arc::new(InMemoryEmployeeRepository::new());
        let companies = Arc::new(InMemoryCompanyRepository::new());
        let services = Arc::new(AppServices::new(employees.clone(), companies.clone()));
        let app = build_router(services);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            employees,
            companies,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    async fn get_json(&self, path: &str) -> Value {
        let res = self.get(path).await;
        if res.status() != StatusCode::OK {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            panic!("expected 200 OK from GET {path}, got {status} body={body}");
        }
        res.json().await.unwrap()
    }

    async fn hire(&self, name: &str, age: i32, gender: &str, company_id: Option<CompanyId>) {
        self.employees
            .insert(NewEmployee {
                name: name.to_string(),
                age,
                gender: gender.to_string(),
                salary: 10000,
                company_id,
            })
            .await
            .unwrap();
    }

    async fn found(&self, name: &str) -> CompanyId {
        self.companies
            .insert(NewCompany {
                name: name.to_string(),
            })
            .await
            .unwrap()
            .id
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn names(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = srv.get("/health").await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let srv = TestServer::spawn().await;

    let res = srv
        .client
        .get(srv.url("/employees"))
        .header("x-request-id", "trace-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-42");

    let res = srv.get("/employees").await;
    let generated = res.headers()["x-request-id"].to_str().unwrap();
    assert!(!generated.is_empty());
}

#[tokio::test]
async fn list_employees_hides_salary() {
    let srv = TestServer::spawn().await;
    srv.hire("Bob", 22, "Male", None).await;

    let list = srv.get_json("/employees").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    let bob = &list[0];
    assert_eq!(bob["name"], "Bob");
    assert_eq!(bob["age"], 22);
    assert_eq!(bob["gender"], "Male");
    assert!(bob["id"].is_i64());
    assert!(bob.get("salary").is_none());
}

#[tokio::test]
async fn get_employee_by_id_and_missing() {
    let srv = TestServer::spawn().await;
    srv.hire("Bob", 22, "Male", None).await;
    let id = srv.get_json("/employees").await[0]["id"].as_i64().unwrap();

    let bob = srv.get_json(&format!("/employees/{id}")).await;
    assert_eq!(bob["name"], "Bob");

    let res = srv.get("/employees/999").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");

    let res = srv.get("/employees/abc").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn filters_employees_by_gender() {
    let srv = TestServer::spawn().await;
    srv.hire("Bob", 22, "Male", None).await;
    srv.hire("Susan", 23, "Female", None).await;
    srv.hire("Lily", 24, "Female", None).await;

    let female = srv.get_json("/employees?gender=Female").await;
    assert_eq!(names(&female), ["Susan", "Lily"]);

    let none = srv.get_json("/employees?gender=female").await;
    assert!(none.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn pages_employees() {
    let srv = TestServer::spawn().await;
    for (name, gender) in [
        ("Bob", "Male"),
        ("Susan", "Female"),
        ("Lily", "Female"),
        ("Tom", "Male"),
        ("Ann", "Female"),
    ] {
        srv.hire(name, 22, gender, None).await;
    }

    let first = srv.get_json("/employees?pageNumber=1&pageSize=2").await;
    assert_eq!(names(&first), ["Bob", "Susan"]);
    let third = srv.get_json("/employees?pageNumber=3&pageSize=2").await;
    assert_eq!(names(&third), ["Ann"]);
    let past_end = srv.get_json("/employees?pageNumber=9&pageSize=2").await;
    assert!(past_end.as_array().unwrap().is_empty());

    let female = srv
        .get_json("/employees?gender=Female&pageNumber=2&pageSize=2")
        .await;
    assert_eq!(names(&female), ["Ann"]);
}

#[tokio::test]
async fn rejects_bad_page_parameters() {
    let srv = TestServer::spawn().await;
    for query in [
        "pageNumber=0&pageSize=2",
        "pageNumber=1&pageSize=0",
        "pageNumber=1",
        "pageSize=5",
        "pageNumber=1&pageSize=5000",
    ] {
        let res = srv.get(&format!("/employees?{query}")).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "query {query}");
        let res = srv.get(&format!("/companies?{query}")).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "query {query}");
    }
}

#[tokio::test]
async fn employee_create_update_delete_lifecycle() {
    let srv = TestServer::spawn().await;

    let res = srv
        .client
        .post(srv.url("/employees"))
        .json(&json!({ "name": "Json", "age": 22, "gender": "Male", "salary": 1000 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["name"], "Json");
    assert!(created.get("salary").is_none());
    let id = created["id"].as_i64().unwrap();

    let res = srv
        .client
        .put(srv.url(&format!("/employees/{id}")))
        .json(&json!({ "age": 24, "salary": 2000 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let updated = srv.get_json(&format!("/employees/{id}")).await;
    assert_eq!(updated["name"], "Json");
    assert_eq!(updated["gender"], "Male");
    assert_eq!(updated["age"], 24);
    let stored = srv.employees.find_all().await.unwrap();
    assert_eq!(stored[0].salary, 2000);

    let res = srv
        .client
        .put(srv.url("/employees/999"))
        .json(&json!({ "age": 30 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    for _ in 0..2 {
        let res = srv
            .client
            .delete(srv.url(&format!("/employees/{id}")))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
    assert_eq!(
        srv.get(&format!("/employees/{id}")).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn companies_report_live_headcount() {
    let srv = TestServer::spawn().await;
    let oocl = srv.found("OOCL").await;
    srv.found("Thoughtworks").await;
    srv.hire("Bob", 22, "Male", Some(oocl)).await;
    srv.hire("Tom", 25, "Male", Some(oocl)).await;
    srv.hire("Free", 30, "Female", None).await;

    let list = srv.get_json("/companies").await;
    assert_eq!(names(&list), ["OOCL", "Thoughtworks"]);
    assert_eq!(list[0]["employeesCount"], 2);
    assert_eq!(list[1]["employeesCount"], 0);

    let one = srv.get_json(&format!("/companies/{oocl}")).await;
    assert_eq!(one["name"], "OOCL");
    assert_eq!(one["employeesCount"], 2);

    let staff = srv.get_json(&format!("/companies/{oocl}/employees")).await;
    assert_eq!(names(&staff), ["Bob", "Tom"]);
    assert!(staff[0].get("salary").is_none());

    let page = srv.get_json("/companies?pageNumber=2&pageSize=1").await;
    assert_eq!(names(&page), ["Thoughtworks"]);
}

#[tokio::test]
async fn company_create_update_delete_lifecycle() {
    let srv = TestServer::spawn().await;

    let res = srv
        .client
        .post(srv.url("/companies"))
        .json(&json!({ "name": "Fully Booked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["name"], "Fully Booked");
    assert_eq!(created["employeesCount"], 0);
    let id = created["id"].as_i64().unwrap();

    let res = srv
        .client
        .put(srv.url(&format!("/companies/{id}")))
        .json(&json!({ "name": "Fully Booked PH" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let renamed = srv.get_json(&format!("/companies/{id}")).await;
    assert_eq!(renamed["name"], "Fully Booked PH");

    srv.hire("Bob", 22, "Male", Some(CompanyId::new(id))).await;

    let res = srv
        .client
        .delete(srv.url(&format!("/companies/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    assert_eq!(
        srv.get(&format!("/companies/{id}")).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        srv.get(&format!("/companies/{id}/employees")).await.status(),
        StatusCode::NOT_FOUND
    );

    // Employees are not cascaded.
    let employees = srv.get_json("/employees").await;
    assert_eq!(names(&employees), ["Bob"]);
}

#[tokio::test]
async fn missing_company_is_not_found() {
    let srv = TestServer::spawn().await;
    assert_eq!(srv.get("/companies/42").await.status(), StatusCode::NOT_FOUND);

    let res = srv
        .client
        .put(srv.url("/companies/42"))
        .json(&json!({ "name": "Ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    assert_eq!(
        srv.get("/companies/not-a-number").await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn new_company_starts_with_zero_headcount() {
    let srv = TestServer::spawn().await;

    // No foreign key: an employee may name a company id before it exists.
    let res = srv
        .client
        .post(srv.url("/employees"))
        .json(&json!({ "name": "Early", "age": 30, "gender": "Male", "salary": 5000, "companyId": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = srv
        .client
        .post(srv.url("/companies"))
        .json(&json!({ "name": "Fully Booked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["id"], 1);
    assert_eq!(created["employeesCount"], 0);
}

#[tokio::test]
async fn malformed_input_uses_the_error_envelope() {
    let srv = TestServer::spawn().await;

    let res = srv
        .client
        .post(srv.url("/employees"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_body");
    assert!(body["message"].is_string());

    let res = srv
        .client
        .post(srv.url("/companies"))
        .json(&json!({ "title": "no name field" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_body");

    let res = srv.get("/employees?pageNumber=one&pageSize=2").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_query");

    let res = srv.get("/companies?pageSize=x&pageNumber=1").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_query");
}
