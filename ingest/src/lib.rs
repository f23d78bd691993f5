//! FILENAME: ingest/src/lib.rs
//! PURPOSE: Loads the survey workbook into an immutable `Dataset`.
//! CONTEXT: The published workbook scatters one statistic per sheet
//! ("Tabell 2.1", "Tabell 2.2", ...), each with one column per survey year.
//! Ingestion joins the requested year's column from every table of a series
//! into a single region x statistic dataset for the view engine.

pub mod error;
pub mod xlsx_reader;

pub use error::IngestError;
pub use xlsx_reader::{
    crime_exposure_dataset, crime_fear_dataset, dataset_for_year, ACCEPTED_YEARS,
    DEFAULT_WORKBOOK,
};
