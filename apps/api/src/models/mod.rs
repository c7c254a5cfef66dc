pub mod agent_run;
pub mod interview;
pub mod review;
