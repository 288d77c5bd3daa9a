//! The write-back runs: read records from a [`CellStore`], compute, write the
//! derived values next to their anchor labels.
//!
//! A failure at any step aborts the run. Earlier writes are not rolled back;
//! whether they persist is up to the store.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;

use crate::config::{InputMarkMode, JobConfig, SheetLayout};
use crate::data::{extract_field, Dataset, MARK_FIELD, OUTCOME_FIELD};
use crate::sheet::{self, parse_a1, CellStore};
use crate::stats::{
    all_correlations, fit_line, weighted_mark, weighted_marks, weights, CorrelationVector,
    FitResult, WeightVector,
};

/// Everything the weighted run computed.
#[derive(Debug, Clone, Serialize)]
pub struct WeightedReport {
    pub students: usize,
    pub correlations: CorrelationVector,
    pub weights: WeightVector,
    pub weighted_marks: Vec<f64>,
    pub fit: FitResult,
    pub prediction: Option<Prediction>,
}

/// A prediction for one new set of input marks.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub input_marks: [f64; 3],
    pub mode: InputMarkMode,
    pub weighted_mark: f64,
    pub predicted_score: f64,
}

/// Outcome of the single-predictor run.
#[derive(Debug, Clone, Serialize)]
pub struct SimpleReport {
    pub students: usize,
    pub fit: FitResult,
    pub input_mark: f64,
    pub predicted_score: f64,
}

// ---------------------------------------------------------------------------
// Pure computation
// ---------------------------------------------------------------------------

/// Composite for a new student's marks under `mode`.
///
/// The legacy sheet computed `weighted_mark(w, english, math, math)`; that
/// behaviour is kept as [`InputMarkMode::Literal`].
pub fn input_weighted_mark(
    weights: &WeightVector,
    marks: [f64; 3],
    mode: InputMarkMode,
) -> f64 {
    let [english, math, ga] = marks;
    match mode {
        InputMarkMode::Corrected => weighted_mark(weights, english, math, ga),
        InputMarkMode::Literal => weighted_mark(weights, english, math, math),
    }
}

/// Run the weighted pipeline over a dataset without touching any store.
pub fn compute_report(
    dataset: &Dataset,
    input_marks: Option<[f64; 3]>,
    mode: InputMarkMode,
) -> Result<WeightedReport> {
    let correlations = all_correlations(dataset).context("computing subject correlations")?;
    let weights = weights(&correlations).context("deriving subject weights")?;
    let marks = weighted_marks(dataset, &weights).context("computing weighted marks")?;
    let outcome = extract_field(dataset, OUTCOME_FIELD).context("extracting outcome scores")?;
    let fit = fit_line(&marks, &outcome).context("fitting line of best fit")?;

    let prediction = input_marks.map(|input| predict_for(&weights, &fit, input, mode));

    Ok(WeightedReport {
        students: dataset.len(),
        correlations,
        weights,
        weighted_marks: marks,
        fit,
        prediction,
    })
}

fn predict_for(
    weights: &WeightVector,
    fit: &FitResult,
    input_marks: [f64; 3],
    mode: InputMarkMode,
) -> Prediction {
    let weighted_mark = input_weighted_mark(weights, input_marks, mode);

    let other = match mode {
        InputMarkMode::Corrected => InputMarkMode::Literal,
        InputMarkMode::Literal => InputMarkMode::Corrected,
    };
    let other_mark = input_weighted_mark(weights, input_marks, other);
    if other_mark != weighted_mark {
        warn!(
            "input composite differs by mode: {mode} = {weighted_mark}, {other} = {other_mark} \
             (literal mode reuses the Math input in place of GA)"
        );
    }

    Prediction {
        input_marks,
        mode,
        weighted_mark,
        predicted_score: fit.predict(weighted_mark),
    }
}

// ---------------------------------------------------------------------------
// Store-backed steps
// ---------------------------------------------------------------------------

/// Write the three correlations below the correlation anchor.
pub fn update_correlations<S: CellStore + ?Sized>(
    store: &mut S,
    layout: &SheetLayout,
    dataset: &Dataset,
) -> Result<CorrelationVector> {
    let corr = all_correlations(dataset).context("computing subject correlations")?;
    sheet::write_named_column(store, &layout.correlation_label, 1, corr.values())?;
    info!("correlations: {:?}", corr.values());
    Ok(corr)
}

/// Write the three weights below the weight anchor.
pub fn update_weights<S: CellStore + ?Sized>(
    store: &mut S,
    layout: &SheetLayout,
    corr: &CorrelationVector,
) -> Result<WeightVector> {
    let w = weights(corr).context("deriving subject weights")?;
    sheet::write_named_column(store, &layout.weight_label, 1, w.values())?;
    info!("weights: {:?}", w.values());
    Ok(w)
}

/// Write each student's composite mark below the weighted-mark anchor.
pub fn update_weighted_marks<S: CellStore + ?Sized>(
    store: &mut S,
    layout: &SheetLayout,
    dataset: &Dataset,
    weights: &WeightVector,
) -> Result<Vec<f64>> {
    let marks = weighted_marks(dataset, weights).context("computing weighted marks")?;
    sheet::write_named_column(store, &layout.weighted_mark_label, 1, &marks)?;
    info!("wrote {} weighted marks", marks.len());
    Ok(marks)
}

/// Read the new student's marks, one column right of each input label.
pub fn read_input_marks<S: CellStore + ?Sized>(
    store: &S,
    layout: &SheetLayout,
) -> Result<[f64; 3]> {
    let mut marks = [0.0; 3];
    for (mark, label) in marks.iter_mut().zip(&layout.input_labels) {
        *mark = sheet::read_named_cell(store, label, 0, 1)
            .with_context(|| format!("reading input mark '{label}'"))?;
    }
    Ok(marks)
}

/// Predict the new student's score and write it beside the output label.
pub fn update_expected_mark<S: CellStore + ?Sized>(
    store: &mut S,
    layout: &SheetLayout,
    weights: &WeightVector,
    fit: &FitResult,
    mode: InputMarkMode,
) -> Result<Prediction> {
    let input_marks = read_input_marks(&*store, layout)?;
    let prediction = predict_for(weights, fit, input_marks, mode);
    sheet::write_named_cell(store, &layout.output_label, 0, 1, prediction.predicted_score)?;
    info!(
        "expected {OUTCOME_FIELD}: {} (weighted mark {}, {mode} inputs {:?})",
        prediction.predicted_score, prediction.weighted_mark, input_marks
    );
    Ok(prediction)
}

/// Correlations → weights → per-student composites → line fit → prediction,
/// each written back to the store.
pub fn run_weighted<S: CellStore + ?Sized>(
    store: &mut S,
    config: &JobConfig,
) -> Result<WeightedReport> {
    let layout = &config.layout;
    let dataset = store.read_records().context("reading student records")?;
    info!("read {} student records", dataset.len());

    let correlations = update_correlations(store, layout, &dataset)?;
    let weights = update_weights(store, layout, &correlations)?;
    let marks = update_weighted_marks(store, layout, &dataset, &weights)?;

    let outcome = extract_field(&dataset, OUTCOME_FIELD).context("extracting outcome scores")?;
    let fit = fit_line(&marks, &outcome).context("fitting line of best fit")?;
    info!("line of best fit: y = {} + {}x", fit.intercept, fit.slope);

    let prediction = update_expected_mark(store, layout, &weights, &fit, config.input_mode)?;

    Ok(WeightedReport {
        students: dataset.len(),
        correlations,
        weights,
        weighted_marks: marks,
        fit,
        prediction: Some(prediction),
    })
}

/// Fit the plain `Mark` column against the outcome and use the fixed cells
/// from [`crate::config::SimpleLayout`].
pub fn run_simple<S: CellStore + ?Sized>(
    store: &mut S,
    config: &JobConfig,
) -> Result<SimpleReport> {
    let cells = &config.simple;
    let dataset = store.read_records().context("reading student records")?;
    info!("read {} student records", dataset.len());

    let marks = extract_field(&dataset, MARK_FIELD).context("extracting marks")?;
    let outcome = extract_field(&dataset, OUTCOME_FIELD).context("extracting outcome scores")?;
    let fit = fit_line(&marks, &outcome).context("fitting line of best fit")?;
    info!("line of best fit: y = {} + {}x", fit.intercept, fit.slope);

    store.write_cell(parse_a1(&cells.intercept_cell)?, fit.intercept)?;
    store.write_cell(parse_a1(&cells.slope_cell)?, fit.slope)?;

    let input_mark = sheet::read_number(&*store, parse_a1(&cells.input_cell)?)
        .with_context(|| format!("reading input mark at {}", cells.input_cell))?;
    let predicted_score = fit.predict(input_mark);
    store.write_cell(parse_a1(&cells.output_cell)?, predicted_score)?;
    info!("expected {OUTCOME_FIELD} for mark {input_mark}: {predicted_score}");

    Ok(SimpleReport {
        students: dataset.len(),
        fit,
        input_mark,
        predicted_score,
    })
}
