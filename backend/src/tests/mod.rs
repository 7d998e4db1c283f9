mod common;
mod negotiation_pipeline_test;
