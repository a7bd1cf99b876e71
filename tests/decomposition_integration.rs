//! Integration tests for decomposition, rendering and the diagnostics owner.

use approx::assert_relative_eq;
use chrono::{DateTime, Duration, TimeZone, Utc};
use forecast_components::core::{FeatureMatrix, TimeSeries, TREND_CHANGEPOINTS_COL};
use forecast_components::decomposition::ComponentDecomposer;
use forecast_components::diagnostics::{
    ComponentDiagnostics, FitAlgorithm, FittedModel, ModelArtifact, DEFAULT_MAX_COLWIDTH,
};
use forecast_components::naming::SeasonalityKey;
use forecast_components::plotting::{AxisValues, ComponentRenderer, RenderConfig};
use forecast_components::DiagnosticsError;

fn daily(n: usize) -> Vec<DateTime<Utc>> {
    let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    (0..n).map(|i| base + Duration::days(i as i64)).collect()
}

fn hourly(n: usize) -> Vec<DateTime<Utc>> {
    let base = Utc.with_ymd_and_hms(2020, 3, 2, 0, 0, 0).unwrap();
    (0..n).map(|i| base + Duration::hours(i as i64)).collect()
}

/// A model fitted on two weeks of hourly data with every component present.
fn hourly_artifact() -> ModelArtifact {
    let n = 24 * 14;
    let ts = hourly(n);
    let t: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();
    let daily_sin: Vec<f64> = (0..n)
        .map(|i| (2.0 * std::f64::consts::PI * (i % 24) as f64 / 24.0).sin())
        .collect();
    let weekly_cos: Vec<f64> = (0..n)
        .map(|i| (2.0 * std::f64::consts::PI * (i % 168) as f64 / 168.0).cos())
        .collect();
    let cp: Vec<f64> = (0..n).map(|i| (i as f64 - 120.0).max(0.0) / n as f64).collect();
    let lag: Vec<f64> = (0..n).map(|i| ((i * 7) % 11) as f64).collect();
    let holiday: Vec<f64> = (0..n).map(|i| if i / 24 == 3 { 1.0 } else { 0.0 }).collect();
    let temp: Vec<f64> = (0..n).map(|i| 15.0 + ((i * 3) % 13) as f64 * 0.1).collect();

    let coefficients = vec![5.0, 3.0, 2.0, 1.5, 0.3, -4.0, 0.2];
    let x_mat = FeatureMatrix::from_columns(vec![
        ("ct1", t),
        ("changepoint0_2020_03_07_00", cp),
        ("sin1_tod_daily", daily_sin),
        ("cos1_tow_weekly", weekly_cos),
        ("load_lag24", lag),
        ("C(Q('events_Holiday'))[T.event]", holiday),
        ("temperature", temp),
    ])
    .unwrap();
    let intercept = 20.0;
    let fitted = x_mat.dot(&coefficients, intercept).unwrap();
    let y: Vec<f64> = fitted
        .iter()
        .enumerate()
        .map(|(i, f)| f + ((i * 13) % 7) as f64 * 0.1 - 0.3)
        .collect();

    let df = TimeSeries::new("timestamp", "load", ts, y).unwrap();
    ModelArtifact::new(
        df,
        x_mat,
        FitAlgorithm::Ridge,
        FittedModel::Linear {
            coefficients,
            intercept,
        },
    )
    .unwrap()
}

#[test]
fn test_end_to_end_daily_example() {
    let y = TimeSeries::univariate(daily(5), vec![10.0, 12.0, 9.0, 15.0, 11.0]).unwrap();
    let weighted = FeatureMatrix::from_columns(vec![
        ("trend_cp0", vec![1.0; 5]),
        ("seasonal_daily_sin1", vec![0.5, -0.5, 0.5, -0.5, 0.5]),
    ])
    .unwrap();

    let table = ComponentDecomposer::new().decompose(&y, &weighted).unwrap();

    assert_eq!(table.column("trend").unwrap(), &[1.0, 1.0, 1.0, 1.0, 1.0]);
    assert_eq!(
        table.column("DAILY_SEASONALITY").unwrap(),
        &[0.5, -0.5, 0.5, -0.5, 0.5]
    );
    assert_eq!(
        table.column("residual").unwrap(),
        &[8.5, 11.5, 7.5, 14.5, 9.5]
    );
    assert!(table.column("autoregression").is_none());
    assert!(table.column("events").is_none());
}

#[test]
fn test_empty_feature_matrix() {
    let y = TimeSeries::univariate(daily(5), vec![1.0; 5]).unwrap();
    let result = ComponentDecomposer::new().decompose(&y, &FeatureMatrix::new());
    assert_eq!(result.unwrap_err(), DiagnosticsError::EmptyInput);
}

#[test]
fn test_row_mismatch() {
    let y = TimeSeries::univariate(daily(5), vec![1.0; 5]).unwrap();
    let weighted = FeatureMatrix::from_columns(vec![("ct1", vec![0.0; 4])]).unwrap();
    assert_eq!(
        ComponentDecomposer::new()
            .decompose(&y, &weighted)
            .unwrap_err(),
        DiagnosticsError::RowMismatch {
            expected: 5,
            got: 4
        }
    );
}

#[test]
fn test_full_decomposition_reconciles() {
    let artifact = hourly_artifact();
    let weighted = artifact.weighted_features().unwrap();
    let table = ComponentDecomposer::new()
        .decompose(artifact.df(), &weighted)
        .unwrap();

    assert_eq!(
        table.column_names(),
        vec![
            "timestamp",
            "load",
            "trend",
            "autoregression",
            "DAILY_SEASONALITY",
            "WEEKLY_SEASONALITY",
            "events",
            "residual",
            TREND_CHANGEPOINTS_COL,
        ]
    );

    let total = weighted.total();
    let residual = table.residual().unwrap();
    for i in 0..table.len() {
        assert_relative_eq!(
            total[i] + residual[i],
            artifact.df().values()[i],
            epsilon = 1e-9
        );
    }

    // intercept and plain regressors are not a component of their own
    let unexplained: Vec<f64> = table
        .values()
        .iter()
        .zip(table.component_total())
        .map(|(y, c)| y - c)
        .collect();
    let intercept_and_temp: Vec<f64> = weighted
        .row_sum(&["Intercept", "temperature"])
        .unwrap();
    for i in 0..table.len() {
        assert_relative_eq!(
            unexplained[i],
            intercept_and_temp[i] + residual[i],
            epsilon = 1e-9
        );
    }

    let flags = table.trend_changepoints().unwrap();
    assert_eq!(flags.iter().filter(|f| **f).count(), 1);
    assert!(flags[120]);
}

#[test]
fn test_render_all_panels_in_table_order() {
    let artifact = hourly_artifact();
    let weighted = artifact.weighted_features().unwrap();
    let table = ComponentDecomposer::new()
        .decompose(artifact.df(), &weighted)
        .unwrap();

    let fig = ComponentRenderer::new().render(&table, None, None).unwrap();

    assert_eq!(
        fig.panel_names(),
        vec![
            "load",
            "trend",
            "autoregression",
            "DAILY_SEASONALITY",
            "WEEKLY_SEASONALITY",
            "events",
            "residual"
        ]
    );
    assert_eq!(fig.title, "Component plots");
    assert_eq!(fig.height, 7 * 350);
    assert_relative_eq!(fig.vertical_spacing, 0.05, epsilon = 1e-12);

    let daily = fig.panel("daily").unwrap();
    assert_eq!(daily.x_axis.title, "Hour of day");
    assert_eq!(daily.traces[0].x.len(), 24);

    let weekly = fig.panel("weekly").unwrap();
    assert_eq!(weekly.x_axis.title, "Day of week");
    assert_eq!(weekly.traces[0].x.len(), 168);

    let trend = fig.panel("trend").unwrap();
    assert_eq!(trend.traces.len(), 2);
    assert!(matches!(trend.traces[1].x, AxisValues::Time(_)));
}

#[test]
fn test_render_partial_selection() {
    let artifact = hourly_artifact();
    let weighted = artifact.weighted_features().unwrap();
    let table = ComponentDecomposer::new()
        .decompose(artifact.df(), &weighted)
        .unwrap();
    let renderer = ComponentRenderer::new();

    let fig = renderer
        .render(&table, Some(&["events", "lagged_regressor", "trend"]), Some("Load"))
        .unwrap();
    assert_eq!(fig.panel_names(), vec!["load", "trend", "events"]);
    assert_eq!(fig.title, "Load");

    let err = renderer
        .render(&table, Some(&["lagged_regressor", "YEARLY_SEASONALITY"]), None)
        .unwrap_err();
    assert_eq!(err, DiagnosticsError::NoMatchingComponents);
}

#[test]
fn test_diagnostics_end_to_end() {
    let artifact = hourly_artifact();
    let mut diagnostics = ComponentDiagnostics::new()
        .with_render_config(RenderConfig::new().with_default_title("Hourly load"));
    diagnostics.set_params(None, "timestamp", "load");

    let fig = diagnostics
        .plot_components(Some(&artifact), None, None)
        .unwrap();
    assert_eq!(fig.title, "Hourly load");
    assert_eq!(fig.num_panels(), 7);

    let json = fig.to_json().unwrap();
    assert!(json.contains("\"showlegend\""));
    assert!(json.contains("trend change point"));

    let table = diagnostics.components().unwrap();
    let profile = diagnostics
        .group_seasonality(table, SeasonalityKey::Daily)
        .unwrap();
    assert_eq!(profile.len(), 24);

    let summary = diagnostics
        .summary(Some(&artifact), DEFAULT_MAX_COLWIDTH)
        .unwrap()
        .unwrap();
    assert_eq!(summary.n_features, 7);
    assert_eq!(summary.n_obs, 24 * 14);
    // the event column name is longer than the display width
    assert!(summary.names_suppressed);
    assert_eq!(summary.predictors_in("regressor_features").len(), 1);
    assert!(summary.accuracy.as_ref().unwrap().r_squared > 0.9);
}

#[test]
fn test_diagnostics_rejects_tree_models() {
    let linear = hourly_artifact();
    let tree = ModelArtifact::new(
        linear.df().clone(),
        linear.x_mat().clone(),
        FitAlgorithm::RandomForest,
        FittedModel::TreeEnsemble {
            feature_importances: vec![0.3, 0.1, 0.2, 0.1, 0.1, 0.1, 0.1],
        },
    )
    .unwrap();

    let mut diagnostics = ComponentDiagnostics::new();
    diagnostics.set_params(None, "timestamp", "load");
    assert!(matches!(
        diagnostics.plot_components(Some(&tree), None, None),
        Err(DiagnosticsError::UnsupportedModel(_))
    ));

    // summaries still work for tree ensembles
    let summary = diagnostics
        .summary(Some(&tree), DEFAULT_MAX_COLWIDTH)
        .unwrap()
        .unwrap();
    assert!(summary.intercept.is_none());
    assert_eq!(summary.predictors[0].importance, Some(0.3));
}
