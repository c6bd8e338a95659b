mod conversion_service_test;
mod markdown_assembler_test;
