use std::io::Result;

fn main() -> Result<()> {
    // List of proto files containing a message definition
    let proto_files = &["proto/relevanced.proto"];

    // Name of the folder containing the proto definitions
    let proto_folder = "proto";

    // Parsed by protox so the build does not need a `protoc` binary.
    let file_descriptors = protox::compile(proto_files, [proto_folder])
        .expect("Failed to compile proto/relevanced.proto");

    for file in proto_files {
        println!("cargo:rerun-if-changed={file}");
    }

    tonic_prost_build::configure()
        .build_client(false)
        .generate_default_stubs(true)
        .compile_fds(file_descriptors)
}
