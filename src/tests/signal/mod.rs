mod emitter_tests;
