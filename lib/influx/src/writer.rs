use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, trace};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::line::{to_nanos, Line};
use crate::{Error, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct Writer {
    url: String,
    db: String,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl Writer {
    pub fn new(url: impl Into<String>, db: impl Into<String>) -> Writer {
        Writer {
            url: url.into(),
            db: db.into(),
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_credentials(mut self, username: Option<String>, password: Option<String>) -> Writer {
        self.credentials = username.zip(password);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Writer {
        self.timeout = timeout;
        self
    }

    pub fn session(&self) -> Result<Session<'_>> {
        let http = reqwest::Client::builder().timeout(self.timeout).build()?;
        trace!("opened session to {}", self.url);

        Ok(Session { writer: self, http })
    }

    pub async fn write(
        &self,
        measurement: &str,
        tag_key: &str,
        tag_value: &str,
        temp_c: f64,
        humidity: f64,
        time: Option<DateTime<Utc>>,
    ) -> Result<()> {
        self.session()?
            .write(measurement, tag_key, tag_value, temp_c, humidity, time)
            .await
    }

    fn endpoint(&self) -> String {
        format!("{}/write", self.url.trim_end_matches('/'))
    }
}

pub struct Session<'w> {
    writer: &'w Writer,
    http: reqwest::Client,
}

impl Session<'_> {
    pub async fn write(
        &self,
        measurement: &str,
        tag_key: &str,
        tag_value: &str,
        temp_c: f64,
        humidity: f64,
        time: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let time = time.unwrap_or_else(Utc::now);

        let line = Line::new(measurement)
            .tag(tag_key, tag_value)
            .field("temp_c", temp_c)
            .field("humidity", humidity)
            .timestamp(to_nanos(&time)?);

        self.write_line(&line).await
    }

    pub async fn write_line(&self, line: &Line) -> Result<()> {
        let line = line.to_string();
        debug!("writing {line}");

        let mut request = self
            .http
            .post(self.writer.endpoint())
            .query(&[("db", self.writer.db.as_str()), ("precision", "ns")])
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(line.clone());

        if let Some((username, password)) = &self.writer.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();

        Err(Error::Write {
            status: status.as_u16(),
            body: body.trim().to_string(),
            line,
        })
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        trace!("closed session to {}", self.writer.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::post;
    use axum::Router;
    use chrono::TimeZone;

    #[derive(Clone, Debug, Default)]
    struct Received {
        query: HashMap<String, String>,
        authorization: Option<String>,
        content_type: Option<String>,
        body: String,
    }

    type Log = Arc<Mutex<Vec<Received>>>;

    async fn serve(status: AxumStatus, reply: &'static str) -> (String, Log) {
        let log = Log::default();

        let app = Router::new()
            .route(
                "/write",
                post(
                    move |State(log): State<Log>,
                          Query(query): Query<HashMap<String, String>>,
                          headers: HeaderMap,
                          body: String| async move {
                        let header = |name: &str| {
                            headers
                                .get(name)
                                .and_then(|value| value.to_str().ok())
                                .map(str::to_string)
                        };

                        log.lock().unwrap().push(Received {
                            query,
                            authorization: header("authorization"),
                            content_type: header("content-type"),
                            body,
                        });

                        (status, reply)
                    },
                ),
            )
            .with_state(log.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        (format!("http://{addr}/"), log)
    }

    #[tokio::test]
    async fn test_write_no_content() {
        let (url, log) = serve(AxumStatus::NO_CONTENT, "").await;
        let writer = Writer::new(url, "switchbot");

        let time = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        writer
            .write("sensor", "sensor_id", "Hall way", 21.5, 60.0, Some(time))
            .await
            .unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);

        let received = &log[0];
        assert_eq!(received.query["db"], "switchbot");
        assert_eq!(received.query["precision"], "ns");
        assert_eq!(received.authorization, None);
        assert_eq!(
            received.content_type.as_deref(),
            Some("text/plain; charset=utf-8")
        );
        assert_eq!(
            received.body,
            r"sensor,sensor_id=Hall\ way temp_c=21.5,humidity=60.0 1704164645000000000"
        );
    }

    #[tokio::test]
    async fn test_write_basic_auth() {
        let (url, log) = serve(AxumStatus::NO_CONTENT, "").await;
        let writer = Writer::new(url, "switchbot")
            .with_credentials(Some("admin".to_string()), Some("secret".to_string()));

        writer
            .write("sensor", "sensor_id", "kitchen", 20.0, 40.0, None)
            .await
            .unwrap();

        let log = log.lock().unwrap();
        // base64("admin:secret")
        assert_eq!(
            log[0].authorization.as_deref(),
            Some("Basic YWRtaW46c2VjcmV0")
        );
    }

    #[test]
    fn test_partial_credentials_are_ignored() {
        let writer = Writer::new("http://localhost:8086", "db")
            .with_credentials(Some("admin".to_string()), None);
        assert!(writer.credentials.is_none());
    }

    #[tokio::test]
    async fn test_write_server_error() {
        let (url, _log) = serve(AxumStatus::INTERNAL_SERVER_ERROR, "boom\n").await;
        let writer = Writer::new(url, "switchbot");

        let result = writer
            .write("sensor", "sensor_id", "kitchen", 20.0, 40.0, None)
            .await;

        match result {
            Err(Error::Write { status, body, line }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
                assert!(line.starts_with("sensor,sensor_id=kitchen temp_c=20.0,humidity=40.0 "));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_session_writes_batch() {
        let (url, log) = serve(AxumStatus::NO_CONTENT, "").await;
        let writer = Writer::new(url, "switchbot");

        {
            let session = writer.session().unwrap();
            for name in ["bedroom", "nursery"] {
                session
                    .write("sensor", "sensor_id", name, 22.0, 45.0, None)
                    .await
                    .unwrap();
            }
        }

        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_is_connectivity() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let writer = Writer::new(format!("http://{addr}"), "switchbot");
        let err = writer
            .write("sensor", "sensor_id", "kitchen", 20.0, 40.0, None)
            .await
            .unwrap_err();

        assert!(err.is_connectivity(), "{err}");
    }
}
