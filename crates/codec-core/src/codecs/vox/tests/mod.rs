//! VOX Test Modules

mod codec_tests;
