// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0
//! Tool handlers. Each tool validates its inputs, issues the provider call
//! (or the short describe-then-query sequence), and reshapes the response
//! into its declared JSON schema. Provider errors are reported in the
//! `error` field of the response; nothing is retried locally.

use aws_sdk_cloudwatch::types::{Dimension, Metric, MetricDataQuery, MetricStat};
use aws_sdk_pi::types::{DimensionGroup, ServiceType};
use aws_sdk_rds::types::DbInstance;
use chrono::Utc;
use rmcp::{
    ServerHandler,
    model::{Content, IntoContents, ServerCapabilities, ServerInfo},
    tool,
};
use serde::Serialize;

/// Stand-in for `rmcp::handler::server::wrapper::Json`, which exists only in the
/// rmcp dev channel the reference pack was built against and is absent from the
/// published 0.1.5 pinned in Cargo.toml. Behaviourally identical: wrap a
/// serializable payload as a single JSON content block.
struct Json<T>(T);

impl<T: Serialize> IntoContents for Json<T> {
    fn into_contents(self) -> Vec<Content> {
        vec![Content::json(self.0).expect("response payloads serialize to JSON")]
    }
}
use std::time::{Duration, SystemTime};

use crate::client::AwsClientManager;
use crate::matcher;
use crate::slowlog::{self, SlowQueryEntry};
use crate::validate;

/// Fixed lookback window for the metrics snapshot, in minutes.
const METRICS_WINDOW_MINUTES: u64 = 30;
/// CloudWatch metrics reported by `get_database_metrics`, all as averages
/// over the `DBInstanceIdentifier` dimension.
const TRACKED_METRICS: [&str; 9] = [
    "CPUUtilization",
    "FreeableMemory",
    "DatabaseConnections",
    "FreeStorageSpace",
    "ReadThroughput",
    "WriteThroughput",
    "ReadLatency",
    "WriteLatency",
    "DBLoad",
];

/// At most this many slow-query entries are kept after sorting.
const MAX_SLOW_QUERIES: usize = 50;
/// Number of entries included verbatim in the response.
const TOP_SLOW_QUERIES: usize = 5;
/// Lines requested per DownloadDBLogFilePortion page.
const LOG_PORTION_LINES: i32 = 1000;

/// Performance Insights groupings: heading, group, dimension.
const LOAD_GROUPS: [(&str, &str, &str); 3] = [
    ("Top SQL", "db.sql", "db.sql.statement"),
    ("Top Users", "db.user", "db.user.name"),
    ("Top Waits", "db.wait_event", "db.wait_event.name"),
];

#[derive(Debug, Serialize)]
struct InstanceSummary {
    identifier: String,
    engine: Option<String>,
    status: Option<String>,
    endpoint: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct InstanceListResponse {
    instances: Vec<InstanceSummary>,
    total_instances: usize,
    error: Option<String>,
}

impl InstanceListResponse {
    fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct DbInfoResponse {
    database: Option<String>,
    status: Option<String>,
    endpoint: Option<String>,
    port: Option<i32>,
    dbi_resource_id: Option<String>,
    allocated_storage_gib: Option<i32>,
    engine: Option<String>,
    engine_version: Option<String>,
    instance_class: Option<String>,
    multi_az: Option<bool>,
    error: Option<String>,
}

impl DbInfoResponse {
    fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct DatabaseMetrics {
    cpu_utilization: Option<f64>,
    free_memory_bytes: Option<f64>,
    connections: Option<f64>,
    free_storage_bytes: Option<f64>,
    read_throughput: Option<f64>,
    write_throughput: Option<f64>,
    read_latency: Option<f64>,
    write_latency: Option<f64>,
    db_load: Option<f64>,
}

#[derive(Debug, Default, Serialize)]
struct MetricsResponse {
    database: Option<String>,
    metrics: Option<DatabaseMetrics>,
    timestamp: Option<String>,
    error: Option<String>,
}

impl MetricsResponse {
    fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct SlowQueryResponse {
    database: Option<String>,
    period_minutes: Option<i64>,
    total_slow_queries: usize,
    top_queries: Vec<SlowQueryEntry>,
    error: Option<String>,
}

impl SlowQueryResponse {
    fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct DimensionLoad {
    dimension: String,
    load: Option<f64>,
}

#[derive(Debug, Serialize)]
struct LoadGroup {
    label: String,
    rows: Vec<DimensionLoad>,
}

#[derive(Debug, Default, Serialize)]
struct LoadResponse {
    database: Option<String>,
    groups: Vec<LoadGroup>,
    error: Option<String>,
}

impl LoadResponse {
    fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct RdsOperator {
    clients: AwsClientManager,
}

impl RdsOperator {
    pub fn new(clients: AwsClientManager) -> Self {
        Self { clients }
    }

    /// Resolve a caller-supplied name against the live instance listing.
    async fn resolve_instance(
        &self,
        client: &aws_sdk_rds::Client,
        database_name: &str,
    ) -> Result<DbInstance, String> {
        let resp = client
            .describe_db_instances()
            .send()
            .await
            .map_err(|err| format!("Failed to describe DB instances: {:?}", err))?;

        let instances = resp.db_instances().unwrap_or_default();
        let identifiers = instances
            .iter()
            .filter_map(|i| i.db_instance_identifier().map(String::from))
            .collect::<Vec<String>>();

        matcher::best_match(database_name, &identifiers)
            .and_then(|matched| {
                instances
                    .iter()
                    .find(|i| i.db_instance_identifier() == Some(matched))
            })
            .cloned()
            .ok_or_else(|| "No matching RDS instance found".to_string())
    }

    /// Download a complete log file through the paged portion API.
    async fn download_log_file(
        &self,
        client: &aws_sdk_rds::Client,
        identifier: &str,
        log_file_name: &str,
    ) -> Result<String, String> {
        let mut data = String::new();
        let mut marker = Some("0".to_string());
        loop {
            let resp = client
                .download_db_log_file_portion()
                .db_instance_identifier(identifier)
                .log_file_name(log_file_name)
                .number_of_lines(LOG_PORTION_LINES)
                .set_marker(marker)
                .send()
                .await
                .map_err(|err| format!("Failed to download log file {}: {:?}", log_file_name, err))?;

            if let Some(chunk) = resp.log_file_data() {
                data.push_str(chunk);
            }
            marker = resp.marker().map(String::from);
            if !resp.additional_data_pending().unwrap_or(false) {
                break;
            }
        }
        Ok(data)
    }

    /// PostgreSQL log files written inside the lookback window.
    async fn postgres_log_files(
        &self,
        client: &aws_sdk_rds::Client,
        identifier: &str,
        period_minutes: i64,
    ) -> Result<Vec<String>, String> {
        let threshold_ms = (Utc::now() - chrono::Duration::minutes(period_minutes)).timestamp_millis();
        let mut log_files = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let resp = client
                .describe_db_log_files()
                .db_instance_identifier(identifier)
                .filename_contains("error/postgresql.log.")
                .set_marker(marker)
                .send()
                .await
                .map_err(|err| format!("Failed to describe DB log files: {:?}", err))?;

            for file in resp.describe_db_log_files().unwrap_or_default() {
                if file.last_written().unwrap_or(0) >= threshold_ms {
                    if let Some(name) = file.log_file_name() {
                        log_files.push(name.to_string());
                    }
                }
            }
            marker = resp.marker().map(String::from);
            if marker.is_none() {
                break;
            }
        }
        Ok(log_files)
    }

    /// Engine-specific slow query collection.
    async fn collect_slow_queries(
        &self,
        client: &aws_sdk_rds::Client,
        identifier: &str,
        engine: &str,
        period_minutes: i64,
    ) -> Result<Vec<SlowQueryEntry>, String> {
        if engine.contains("mysql") {
            let data = self
                .download_log_file(client, identifier, "slowquery/mysql-slowquery.log")
                .await?;
            Ok(slowlog::parse_mysql_slow_log(&data))
        } else if engine.contains("postgres") {
            let log_files = self
                .postgres_log_files(client, identifier, period_minutes)
                .await?;
            tracing::info!("Found {} PostgreSQL log files in window", log_files.len());
            let mut entries = Vec::new();
            for log_file in &log_files {
                let data = self.download_log_file(client, identifier, log_file).await?;
                entries.extend(slowlog::parse_postgres_log(&data));
            }
            Ok(entries)
        } else {
            Err(format!("Unsupported database engine: {}", engine))
        }
    }
}

#[tool(tool_box)]
impl RdsOperator {
    #[tool(description = "List RDS database instances")]
    async fn list_instances(
        &self,
        #[tool(param)]
        #[schemars(description = "AWS region to list instances from (defaults to the server region)")]
        region: Option<String>,
    ) -> Json<InstanceListResponse> {
        if let Err(err) = validate::region(region.as_deref()) {
            return Json(InstanceListResponse::error(err.to_string()));
        }
        let region = region.unwrap_or_default();
        tracing::info!("Listing RDS instances...");

        let client = self.clients.rds(&region).await;
        match client.describe_db_instances().send().await {
            Ok(resp) => {
                let instances = resp
                    .db_instances()
                    .unwrap_or_default()
                    .iter()
                    .map(|instance| InstanceSummary {
                        identifier: instance
                            .db_instance_identifier()
                            .unwrap_or_default()
                            .to_string(),
                        engine: instance.engine().map(String::from),
                        status: instance.db_instance_status().map(String::from),
                        endpoint: instance
                            .endpoint()
                            .and_then(|ep| ep.address())
                            .map(String::from),
                    })
                    .collect::<Vec<InstanceSummary>>();

                tracing::info!("Successfully listed {} RDS instances", instances.len());
                Json(InstanceListResponse {
                    total_instances: instances.len(),
                    instances,
                    error: None,
                })
            }
            Err(err) => {
                tracing::error!("Failed to list RDS instances: {:?}", err);
                Json(InstanceListResponse::error(format!("Error: {:?}", err)))
            }
        }
    }

    #[tool(description = "Get detailed information about an RDS database instance")]
    async fn get_db_info(
        &self,
        #[tool(param)]
        #[schemars(description = "RDS database instance name (shorthand accepted)")]
        database_name: String,
        #[tool(param)]
        #[schemars(description = "AWS region override")]
        region: Option<String>,
    ) -> Json<DbInfoResponse> {
        if let Err(err) = validate::database_name(&database_name) {
            return Json(DbInfoResponse::error(err.to_string()));
        }
        if let Err(err) = validate::region(region.as_deref()) {
            return Json(DbInfoResponse::error(err.to_string()));
        }
        tracing::info!("Getting DB info for {}...", database_name);

        let client = self.clients.rds(&region.unwrap_or_default()).await;
        let instance = match self.resolve_instance(&client, &database_name).await {
            Ok(instance) => instance,
            Err(err) => {
                tracing::error!("Failed to resolve instance {}: {}", database_name, err);
                return Json(DbInfoResponse::error(err));
            }
        };

        Json(DbInfoResponse {
            database: instance.db_instance_identifier().map(String::from),
            status: instance.db_instance_status().map(String::from),
            endpoint: instance
                .endpoint()
                .and_then(|ep| ep.address())
                .map(String::from),
            port: instance.endpoint().and_then(|ep| ep.port()),
            dbi_resource_id: instance.dbi_resource_id().map(String::from),
            allocated_storage_gib: instance.allocated_storage(),
            engine: instance.engine().map(String::from),
            engine_version: instance.engine_version().map(String::from),
            instance_class: instance.db_instance_class().map(String::from),
            multi_az: instance.multi_az(),
            error: None,
        })
    }

    #[tool(
        description = "Get key RDS metrics (CPU, memory, connections, storage, throughput, latency, load) over the last 30 minutes"
    )]
    async fn get_database_metrics(
        &self,
        #[tool(param)]
        #[schemars(description = "RDS database instance name (shorthand accepted)")]
        database_name: String,
        #[tool(param)]
        #[schemars(description = "AWS region override")]
        region: Option<String>,
        #[tool(param)]
        #[schemars(description = "Metric period in seconds (default 60)")]
        granularity_seconds: Option<i32>,
    ) -> Json<MetricsResponse> {
        let granularity = granularity_seconds.unwrap_or(60);
        if let Err(err) = validate::database_name(&database_name) {
            return Json(MetricsResponse::error(err.to_string()));
        }
        if let Err(err) = validate::region(region.as_deref()) {
            return Json(MetricsResponse::error(err.to_string()));
        }
        if let Err(err) = validate::granularity_seconds(granularity) {
            return Json(MetricsResponse::error(err.to_string()));
        }
        tracing::info!("Getting database metrics for {}...", database_name);

        let region = region.unwrap_or_default();
        let rds = self.clients.rds(&region).await;
        let instance = match self.resolve_instance(&rds, &database_name).await {
            Ok(instance) => instance,
            Err(err) => {
                tracing::error!("Failed to resolve instance {}: {}", database_name, err);
                return Json(MetricsResponse::error(err));
            }
        };
        let identifier = instance
            .db_instance_identifier()
            .unwrap_or_default()
            .to_string();

        let now = SystemTime::now();
        let start = now
            .checked_sub(Duration::from_secs(METRICS_WINDOW_MINUTES * 60))
            .unwrap_or(now);

        let queries = TRACKED_METRICS
            .iter()
            .map(|name| {
                MetricDataQuery::builder()
                    .id(name.to_lowercase())
                    .metric_stat(
                        MetricStat::builder()
                            .metric(
                                Metric::builder()
                                    .namespace("AWS/RDS")
                                    .metric_name(*name)
                                    .dimensions(
                                        Dimension::builder()
                                            .name("DBInstanceIdentifier")
                                            .value(&identifier)
                                            .build(),
                                    )
                                    .build(),
                            )
                            .period(granularity)
                            .stat("Average")
                            .build(),
                    )
                    .build()
            })
            .collect::<Vec<MetricDataQuery>>();

        let cloudwatch = self.clients.cloudwatch(&region).await;
        match cloudwatch
            .get_metric_data()
            .set_metric_data_queries(Some(queries))
            .start_time(start.into())
            .end_time(now.into())
            .send()
            .await
        {
            Ok(resp) => {
                let mut metrics = DatabaseMetrics::default();
                for result in resp.metric_data_results().unwrap_or_default() {
                    let value = result.values().unwrap_or_default().last().copied();
                    match result.id().unwrap_or_default() {
                        "cpuutilization" => metrics.cpu_utilization = value,
                        "freeablememory" => metrics.free_memory_bytes = value,
                        "databaseconnections" => metrics.connections = value,
                        "freestoragespace" => metrics.free_storage_bytes = value,
                        "readthroughput" => metrics.read_throughput = value,
                        "writethroughput" => metrics.write_throughput = value,
                        "readlatency" => metrics.read_latency = value,
                        "writelatency" => metrics.write_latency = value,
                        "dbload" => metrics.db_load = value,
                        _ => {}
                    }
                }

                tracing::info!("Successfully retrieved metrics for {}", identifier);
                Json(MetricsResponse {
                    database: Some(identifier),
                    metrics: Some(metrics),
                    timestamp: Some(Utc::now().to_rfc3339()),
                    error: None,
                })
            }
            Err(err) => {
                tracing::error!("Failed to get metric data for {}: {:?}", identifier, err);
                Json(MetricsResponse::error(format!("Error: {:?}", err)))
            }
        }
    }

    #[tool(
        description = "Get slow query log entries from an RDS database (MySQL and PostgreSQL engines)"
    )]
    async fn get_database_queries(
        &self,
        #[tool(param)]
        #[schemars(description = "RDS database instance name (shorthand accepted)")]
        database_name: String,
        #[tool(param)]
        #[schemars(description = "AWS region override")]
        region: Option<String>,
        #[tool(param)]
        #[schemars(description = "Lookback window in minutes (default 60)")]
        period_minutes: Option<i64>,
    ) -> Json<SlowQueryResponse> {
        let period = period_minutes.unwrap_or(60);
        if let Err(err) = validate::database_name(&database_name) {
            return Json(SlowQueryResponse::error(err.to_string()));
        }
        if let Err(err) = validate::region(region.as_deref()) {
            return Json(SlowQueryResponse::error(err.to_string()));
        }
        if let Err(err) = validate::time_range_minutes(period) {
            return Json(SlowQueryResponse::error(err.to_string()));
        }
        tracing::info!(
            "Getting slow queries for {} over the last {} minutes...",
            database_name,
            period
        );

        let client = self.clients.rds(&region.unwrap_or_default()).await;
        let instance = match self.resolve_instance(&client, &database_name).await {
            Ok(instance) => instance,
            Err(err) => {
                tracing::error!("Failed to resolve instance {}: {}", database_name, err);
                return Json(SlowQueryResponse::error(err));
            }
        };
        let identifier = instance
            .db_instance_identifier()
            .unwrap_or_default()
            .to_string();
        let engine = instance.engine().unwrap_or_default().to_lowercase();

        let entries = match self
            .collect_slow_queries(&client, &identifier, &engine, period)
            .await
        {
            Ok(entries) => slowlog::sort_and_cap(entries, MAX_SLOW_QUERIES),
            Err(err) => {
                tracing::error!("Failed to collect slow queries for {}: {}", identifier, err);
                return Json(SlowQueryResponse::error(err));
            }
        };

        tracing::info!(
            "Collected {} slow queries for {} ({})",
            entries.len(),
            identifier,
            engine
        );
        Json(SlowQueryResponse {
            database: Some(identifier),
            period_minutes: Some(period),
            total_slow_queries: entries.len(),
            top_queries: entries.iter().take(TOP_SLOW_QUERIES).cloned().collect(),
            error: None,
        })
    }

    #[tool(
        description = "Get the top SQL statements, users and wait events by database load (Performance Insights)"
    )]
    async fn get_top_rds_load(
        &self,
        #[tool(param)]
        #[schemars(description = "RDS database instance name (shorthand accepted)")]
        database_name: String,
        #[tool(param)]
        #[schemars(description = "AWS region override")]
        region: Option<String>,
        #[tool(param)]
        #[schemars(description = "Lookback window in minutes (default 30)")]
        minutes: Option<i64>,
        #[tool(param)]
        #[schemars(description = "Maximum rows per group (default 5, at most 25)")]
        max_results: Option<i32>,
    ) -> Json<LoadResponse> {
        let minutes = minutes.unwrap_or(30);
        let max_results = max_results.unwrap_or(5);
        if let Err(err) = validate::database_name(&database_name) {
            return Json(LoadResponse::error(err.to_string()));
        }
        if let Err(err) = validate::region(region.as_deref()) {
            return Json(LoadResponse::error(err.to_string()));
        }
        if let Err(err) = validate::time_range_minutes(minutes) {
            return Json(LoadResponse::error(err.to_string()));
        }
        if let Err(err) = validate::max_results(max_results) {
            return Json(LoadResponse::error(err.to_string()));
        }
        tracing::info!("Getting top load for {}...", database_name);

        let region = region.unwrap_or_default();
        let rds = self.clients.rds(&region).await;
        let instance = match self.resolve_instance(&rds, &database_name).await {
            Ok(instance) => instance,
            Err(err) => {
                tracing::error!("Failed to resolve instance {}: {}", database_name, err);
                return Json(LoadResponse::error(err));
            }
        };
        let identifier = instance
            .db_instance_identifier()
            .unwrap_or_default()
            .to_string();
        let Some(resource_id) = instance.dbi_resource_id().map(String::from) else {
            return Json(LoadResponse::error(format!(
                "Instance {} does not report a DBI resource id",
                identifier
            )));
        };

        let now = SystemTime::now();
        let start = now
            .checked_sub(Duration::from_secs(minutes as u64 * 60))
            .unwrap_or(now);

        let pi = self.clients.pi(&region).await;
        let mut groups = Vec::new();
        for (label, group, dimension) in LOAD_GROUPS {
            match pi
                .describe_dimension_keys()
                .service_type(ServiceType::Rds)
                .identifier(&resource_id)
                .metric("db.load.avg")
                .start_time(start.into())
                .end_time(now.into())
                .group_by(
                    DimensionGroup::builder()
                        .group(group)
                        .dimensions(dimension)
                        .build(),
                )
                .max_results(max_results)
                .send()
                .await
            {
                Ok(resp) => {
                    let mut rows = resp
                        .keys()
                        .unwrap_or_default()
                        .iter()
                        .map(|key| DimensionLoad {
                            dimension: key
                                .dimensions()
                                .and_then(|dims| dims.get(dimension))
                                .cloned()
                                .unwrap_or_else(|| "Unknown".to_string()),
                            load: key.total().map(|total| (total * 100.0).round() / 100.0),
                        })
                        .collect::<Vec<DimensionLoad>>();
                    rows.sort_by(|a, b| {
                        let (a, b) = (a.load.unwrap_or(0.0), b.load.unwrap_or(0.0));
                        b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
                    });
                    groups.push(LoadGroup {
                        label: label.to_string(),
                        rows,
                    });
                }
                Err(err) => {
                    tracing::error!("Failed to describe dimension keys for {}: {:?}", label, err);
                    return Json(LoadResponse::error(format!("Error: {:?}", err)));
                }
            }
        }

        tracing::info!("Successfully retrieved top load for {}", identifier);
        Json(LoadResponse {
            database: Some(identifier),
            groups,
            error: None,
        })
    }
}

#[tool(tool_box)]
impl ServerHandler for RdsOperator {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Read-only inspection tools for Amazon RDS instances: metadata, \
                 CloudWatch metrics, slow query logs and Performance Insights load"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn assert_has_keys(value: &Value, expected: &[&str]) {
        let object = value.as_object().expect("response serializes to an object");
        assert_eq!(object.len(), expected.len());
        for key in expected {
            assert!(object.contains_key(*key), "missing key {}", key);
        }
    }

    #[test]
    fn instance_list_schema_is_stable_on_error() {
        let value = serde_json::to_value(InstanceListResponse::error("boom")).unwrap();
        assert_has_keys(&value, &["instances", "total_instances", "error"]);
        assert_eq!(value["error"], "boom");
        assert_eq!(value["total_instances"], 0);
    }

    #[test]
    fn db_info_schema_carries_all_fields_when_empty() {
        let value = serde_json::to_value(DbInfoResponse::error("nope")).unwrap();
        for key in [
            "database",
            "status",
            "endpoint",
            "port",
            "dbi_resource_id",
            "allocated_storage_gib",
            "engine",
            "engine_version",
            "instance_class",
            "multi_az",
            "error",
        ] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(value["status"], Value::Null);
    }

    #[test]
    fn metrics_schema_lists_every_tracked_metric() {
        let value = serde_json::to_value(DatabaseMetrics::default()).unwrap();
        assert_eq!(
            value.as_object().unwrap().len(),
            TRACKED_METRICS.len(),
            "one response field per tracked metric"
        );
        for key in [
            "cpu_utilization",
            "free_memory_bytes",
            "connections",
            "free_storage_bytes",
            "read_throughput",
            "write_throughput",
            "read_latency",
            "write_latency",
            "db_load",
        ] {
            assert_eq!(value[key], Value::Null);
        }
    }

    #[test]
    fn slow_query_schema_is_stable_when_empty() {
        let value = serde_json::to_value(SlowQueryResponse::default()).unwrap();
        assert_has_keys(
            &value,
            &[
                "database",
                "period_minutes",
                "total_slow_queries",
                "top_queries",
                "error",
            ],
        );
        assert_eq!(value["top_queries"], Value::Array(vec![]));
    }

    #[test]
    fn load_response_error_preserves_message() {
        let value = serde_json::to_value(LoadResponse::error("throttled")).unwrap();
        assert_eq!(value["error"], "throttled");
        assert_eq!(value["groups"], Value::Array(vec![]));
    }
}
