mod journal_test;
mod monitor_test;
