pub mod quiz_session;
