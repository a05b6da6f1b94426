#[actix_web::main]
async fn main() -> std::io::Result<()> {
    slide_generator_server::run().await
}
