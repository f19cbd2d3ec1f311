use actix_web::{App, http::StatusCode, test};
use inntime::database::models::{
    AuthResponse, Employee, EmployeeMonthView, EmployeeSummary, MonthlyReport, TimesheetEntry,
    WageImportSummary, WageMode, WageSnapshot,
};
use pretty_assertions::assert_eq;
use serde_json::json;

mod common;

use common::{TEST_ADMIN_PASSWORD, TestApp, date, period, read_success};

#[actix_rt::test]
async fn admin_login_issues_token() {
    let ctx = TestApp::new().await.unwrap();
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/login")
        .set_json(json!({ "password": TEST_ADMIN_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let auth: AuthResponse = read_success(resp).await;
    let req = test::TestRequest::get()
        .uri("/api/v1/admin/employees")
        .insert_header(("Authorization", format!("Bearer {}", auth.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn wrong_password_is_rejected() {
    let ctx = TestApp::new().await.unwrap();
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/login")
        .set_json(json!({ "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn admin_routes_require_token() {
    let ctx = TestApp::new().await.unwrap();
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    for uri in [
        "/api/v1/admin/employees",
        "/api/v1/admin/reports/2024/3",
        "/api/v1/admin/reports/2024/3/csv",
        "/api/v1/admin/employees/export",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/employees")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn change_password_then_login_with_new_one() {
    let ctx = TestApp::new().await.unwrap();
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/change-password")
        .insert_header(ctx.bearer())
        .set_json(json!({ "oldPassword": "nope", "newPassword": "secret" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/change-password")
        .insert_header(ctx.bearer())
        .set_json(json!({ "oldPassword": TEST_ADMIN_PASSWORD, "newPassword": "secret" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/login")
        .set_json(json!({ "password": "secret" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn create_employee_applies_defaults() {
    let ctx = TestApp::new().await.unwrap();
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/employees")
        .insert_header(ctx.bearer())
        .set_json(json!({ "firstName": "Anna", "lastName": "Berg" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let employee: Employee = read_success(resp).await;
    assert_eq!(employee.wage, WageMode::Hourly { rate: 12.0 });
    assert_eq!(employee.employment_type, "Regular");

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/employees")
        .insert_header(ctx.bearer())
        .set_json(json!({ "firstName": "", "lastName": "Berg" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn public_employee_lookups() {
    let ctx = TestApp::new().await.unwrap();
    let anna = ctx.hourly_employee("Anna", "Berg", 12.0).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::get().uri("/api/v1/employees").to_request();
    let summaries: Vec<EmployeeSummary> =
        read_success(test::call_service(&app, req).await).await;
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].name, "Anna Berg");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/links/{}", anna.link_token))
        .to_request();
    let summary: EmployeeSummary = read_success(test::call_service(&app, req).await).await;
    assert_eq!(summary.id, anna.id);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/links/{}", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn timesheet_upsert_over_http() {
    let ctx = TestApp::new().await.unwrap();
    let anna = ctx.hourly_employee("Anna", "Berg", 12.0).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let body = json!({
        "employeeId": anna.id,
        "date": "2024-03-04",
        "startTime": "08:00",
        "endTime": "17:00"
    });
    let req = test::TestRequest::post()
        .uri("/api/v1/timesheets")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/timesheets")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/timesheets?employeeId={}&date=2024-03-04",
            anna.id
        ))
        .to_request();
    let entries: Vec<TimesheetEntry> = read_success(test::call_service(&app, req).await).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date, date(2024, 3, 4));
}

#[actix_rt::test]
async fn invalid_timesheets_are_rejected() {
    let ctx = TestApp::new().await.unwrap();
    let anna = ctx.hourly_employee("Anna", "Berg", 12.0).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/timesheets")
        .set_json(json!({
            "employeeId": anna.id,
            "date": "2024-03-04",
            "startTime": "08:00",
            "endTime": "25:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/timesheets")
        .set_json(json!({
            "employeeId": uuid::Uuid::new_v4(),
            "date": "2024-03-04",
            "startTime": "08:00",
            "endTime": "12:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn monthly_report_endpoint() {
    let ctx = TestApp::new().await.unwrap();
    let anna = ctx.hourly_employee("Anna", "Berg", 12.0).await;
    ctx.log_time(anna.id, date(2024, 3, 4), "08:00", "17:00").await;
    ctx.log_time(anna.id, date(2024, 3, 5), "08:00", "11:00").await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/reports/2024/3")
        .insert_header(ctx.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let report: MonthlyReport = read_success(resp).await;
    assert_eq!(report.total_hours, 12.0);
    assert_eq!(report.total_wage, 144.0);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/employees/{}/report/2024/3", anna.id))
        .to_request();
    let employee: EmployeeMonthView = read_success(test::call_service(&app, req).await).await;
    assert_eq!(employee.total_hours, 12.0);
    assert_eq!(employee.days.len(), 2);
}

#[actix_rt::test]
async fn employee_month_view_hides_wage_figures() {
    let ctx = TestApp::new().await.unwrap();
    let anna = ctx.hourly_employee("Anna", "Berg", 12.0).await;
    ctx.log_time(anna.id, date(2024, 3, 4), "08:00", "17:00").await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/employees/{}/report/2024/3", anna.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let data = &body["data"];
    assert_eq!(data["totalHours"], json!(9.0));
    for field in ["totalWage", "rateOrAmount", "wageMode", "wageSource"] {
        assert!(data.get(field).is_none(), "{} must not be exposed", field);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/employees/{}/report/2024/3", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn invalid_month_is_bad_request() {
    let ctx = TestApp::new().await.unwrap();
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    for uri in ["/api/v1/admin/reports/2024/13", "/api/v1/admin/reports/2024/0"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(ctx.bearer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[actix_rt::test]
async fn report_csv_is_an_attachment() {
    let ctx = TestApp::new().await.unwrap();
    let anna = ctx.hourly_employee("Anna", "Berg", 12.0).await;
    ctx.log_time(anna.id, date(2024, 3, 4), "08:00", "17:00").await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/reports/2024/3/csv")
        .insert_header(ctx.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("Content-Disposition").unwrap(),
        "attachment; filename=\"InnTime_Report_2024-03.csv\""
    );
    assert!(
        resp.headers()
            .get("Content-Type")
            .and_then(|value| value.to_str().ok())
            .unwrap()
            .starts_with("text/csv")
    );

    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.starts_with('\u{FEFF}'));
    assert!(text.contains("Anna Berg"));
    assert!(text.contains(",9.00,108.00"));
}

#[actix_rt::test]
async fn wage_snapshot_correction_and_history() {
    let ctx = TestApp::new().await.unwrap();
    let anna = ctx.hourly_employee("Anna", "Berg", 12.0).await;
    ctx.log_time(anna.id, date(2024, 3, 4), "08:00", "18:00").await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/admin/employees/{}/wages/2024/3", anna.id))
        .insert_header(ctx.bearer())
        .set_json(json!({ "salaryType": "hourly", "hourlyWage": 11.0 }))
        .to_request();
    let snapshot: WageSnapshot = read_success(test::call_service(&app, req).await).await;
    assert_eq!(snapshot.wage, WageMode::Hourly { rate: 11.0 });

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/admin/employees/{}/wages", anna.id))
        .insert_header(ctx.bearer())
        .to_request();
    let history: Vec<WageSnapshot> = read_success(test::call_service(&app, req).await).await;
    assert_eq!(history.len(), 2);

    let report = ctx
        .state
        .report_service
        .monthly_report(period(2024, 3))
        .await
        .unwrap();
    assert_eq!(report.employee(anna.id).unwrap().total_wage, 110.0);
}

#[actix_rt::test]
async fn wage_import_reports_unknown_employees() {
    let ctx = TestApp::new().await.unwrap();
    let anna = ctx.hourly_employee("Anna", "Berg", 12.0).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let csv = "employee,year,month,salary_type,amount\n\
               Anna Berg,2024,3,Stundenlohn,\"13,50\"\n\
               Nobody Here,2024,3,hourly,12\n";
    let req = test::TestRequest::post()
        .uri("/api/v1/admin/wages/import")
        .insert_header(ctx.bearer())
        .insert_header(("Content-Type", "text/plain"))
        .set_payload(csv)
        .to_request();
    let summary: WageImportSummary = read_success(test::call_service(&app, req).await).await;

    assert_eq!(summary.imported, 1);
    assert_eq!(summary.errors.len(), 1);

    let snapshot = ctx
        .wage_history
        .find_snapshot(anna.id, period(2024, 3))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.wage, WageMode::Hourly { rate: 13.5 });
}

#[actix_rt::test]
async fn employee_export_is_not_shadowed_by_id_route() {
    let ctx = TestApp::new().await.unwrap();
    ctx.hourly_employee("Anna", "Berg", 12.0).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/employees/export")
        .insert_header(ctx.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8(body.to_vec()).unwrap().contains("Anna"));
}
