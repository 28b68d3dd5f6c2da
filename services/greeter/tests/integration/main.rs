mod grpc_client_test;
mod helpers;
