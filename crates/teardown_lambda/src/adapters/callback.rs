/// Transport for the single HTTP PUT carrying the custom-resource response.
pub trait CallbackTransport {
    fn put(&self, url: &str, headers: &[(String, String)], body: &[u8]) -> Result<u16, String>;
}
