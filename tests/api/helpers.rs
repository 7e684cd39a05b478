use chrono::{Duration, Local};
use diesel::{Connection, PgConnection, RunQueryDsl};
use once_cell::sync::Lazy;
use restaurant::{
    configuration::{DatabaseSettings, Settings},
    db_interaction::{insert_table, insert_user, NewAccount},
    domain::{AccountPassword, UserEmail},
    models::{DiningTable, NewDiningTable, ROLE_ADMIN},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
    utils::{build_connection_pool, DbPool}
};
use secrecy::SecretString;
use serde_json::Value;
use uuid::Uuid;

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "restaurant-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber).expect("Failed to set subscriber");
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber).expect("Failed to set subscriber");
    }
});

pub const ADMIN_EMAIL: &str = "staff@restaurant.com";
pub const PASSWORD: &str = "Secret123!";

pub struct TestApp{
    pub host: String,
    pub port: u16,
    pub pool: DbPool,
    pub api_client: reqwest::Client
}

// A slot a week from now, always valid regardless of when tests run
pub fn future_date() -> String {
    (Local::now().date_naive() + Duration::days(7)).format("%Y-%m-%d").to_string()
}

pub fn reservation_body(number_of_people: i32, time: &str) -> Value {
    serde_json::json!({
        "name": "Jean Dupont",
        "phone": "0612345678",
        "number_of_people": number_of_people,
        "date": future_date(),
        "time": time,
        "note": "Anniversaire"
    })
}

pub fn table_ids(reservation: &Value) -> Vec<i64> {
    reservation["tables"]
        .as_array()
        .expect("reservation has no tables array")
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect()
}

impl TestApp {
    fn create_db(settings: &DatabaseSettings){
        let mut connection = PgConnection::establish(&settings.get_database_url())
                                .expect("Failed to connect to postgres database");

        let query = format!(r#"CREATE DATABASE "{}";"#, settings.name);
        diesel::sql_query(query)
            .execute(&mut connection)
            .expect("Failed to create test database");
    }

    pub fn get_app_url(&self) -> String{
        format!("http://{}:{}", self.host, self.port)
    }

    pub async fn spawn_app() -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        let mut settings = Settings::get().expect("Failed to read configuration");
        settings.application.port = 0;
        settings.application.seed_demo_data = false;
        settings.database.name = Uuid::new_v4().to_string();

        TestApp::create_db(&settings.database);
        let pool = build_connection_pool(&settings.database)
            .expect("Failed to build connection pool to test database");

        let application = Application::new(settings)
                            .await
                            .expect("Failed to build application");

        let host = application.host.clone();
        let port = application.port;
        tokio::task::spawn(application.server);

        TestApp{
            host,
            port,
            pool,
            api_client: reqwest::Client::new()
        }
    }

    /// Inserts tables in order, so ids follow the slice.
    pub async fn add_tables(&self, seats: &[i32]) -> Vec<DiningTable>{
        let mut tables = Vec::new();

        for (i, seats) in seats.iter().enumerate() {
            let table = insert_table(
                self.pool.get().unwrap(),
                NewDiningTable{ name: format!("T{}", i + 1), seats: *seats }
            )
            .await
            .expect("Failed to insert table");

            tables.push(table);
        }

        tables
    }

    // T1:2, T2:2, T3:4, T4:4, T5:6
    pub async fn add_demo_tables(&self) -> Vec<DiningTable>{
        self.add_tables(&[2, 2, 4, 4, 6]).await
    }

    pub async fn admin_token(&self) -> String{
        let admin = NewAccount{
            email: UserEmail::parse(ADMIN_EMAIL.to_string()).unwrap(),
            password: AccountPassword::parse(SecretString::from(PASSWORD.to_string())).unwrap(),
            first_name: "Admin".to_string(),
            last_name: "Restaurant".to_string(),
            phone: None,
            role: ROLE_ADMIN
        };

        insert_user(self.pool.get().unwrap(), admin)
            .await
            .expect("Failed to insert admin");

        self.login_token(ADMIN_EMAIL, PASSWORD).await
    }

    pub async fn client_token(&self, email: &str) -> String{
        let response = self.post_signup(&serde_json::json!({
            "email": email,
            "password": PASSWORD,
            "fname": "Jean",
            "lname": "Dupont",
            "phone": "0612345678"
        }))
        .await;

        assert_eq!(response.status().as_u16(), 201);

        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn login_token(&self, email: &str, password: &str) -> String{
        let response = self.post_login(&serde_json::json!({
            "email": email,
            "password": password
        }))
        .await;

        assert_eq!(response.status().as_u16(), 200);

        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn post_signup(&self, body: &Value) -> reqwest::Response{
        self.api_client.post(format!("{}/api/signup", self.get_app_url()))
            .json(body)
            .send()
            .await
            .expect("Failed to send request to signup endpoint")
    }

    pub async fn post_login(&self, body: &Value) -> reqwest::Response{
        self.api_client.post(format!("{}/api/login", self.get_app_url()))
            .json(body)
            .send()
            .await
            .expect("Failed to send request to login endpoint")
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response{
        let mut request = self.api_client.get(format!("{}{}", self.get_app_url(), path));

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        request.send()
            .await
            .expect("Failed to send GET request")
    }

    pub async fn post(&self, path: &str, token: &str, body: &Value) -> reqwest::Response{
        self.api_client.post(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request")
    }

    pub async fn put(&self, path: &str, token: &str, body: &Value) -> reqwest::Response{
        self.api_client.put(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request")
    }

    pub async fn patch(&self, path: &str, token: &str) -> reqwest::Response{
        self.api_client.patch(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to send PATCH request")
    }

    pub async fn delete(&self, path: &str, token: &str) -> reqwest::Response{
        self.api_client.delete(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to send DELETE request")
    }

    /// Books `number_of_people` at `time` a week from now and returns the
    /// reservation JSON.
    pub async fn book(&self, token: &str, number_of_people: i32, time: &str) -> Value{
        let response = self.post("/api/reservations", token, &reservation_body(number_of_people, time)).await;
        assert_eq!(response.status().as_u16(), 201);

        let body: Value = response.json().await.unwrap();
        body["reservation"].clone()
    }
}
