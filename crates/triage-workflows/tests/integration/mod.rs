mod first_run;
mod incremental;
