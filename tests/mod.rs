mod support;

mod reconciler_tests;
