//! G.711 Test Modules

mod decoder_tests;
