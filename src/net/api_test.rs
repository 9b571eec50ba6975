use super::*;

#[test]
fn room_endpoints_embed_the_room_id() {
    assert_eq!(room_endpoint(12), "/api/rooms/12");
    assert_eq!(room_action_endpoint(12, "leave"), "/api/rooms/12/leave");
    assert_eq!(room_action_endpoint(12, "start"), "/api/rooms/12/start");
}

#[test]
fn room_by_code_endpoint_embeds_the_code() {
    assert_eq!(room_by_code_endpoint("QZ42XY"), "/api/rooms/code/QZ42XY");
}

#[test]
fn rooms_list_endpoint_without_search_has_paging_only() {
    assert_eq!(rooms_list_endpoint(0, 20, ""), "/api/rooms?page=0&size=20");
}

#[test]
fn rooms_list_endpoint_appends_search_term() {
    assert_eq!(
        rooms_list_endpoint(2, 10, "history"),
        "/api/rooms?page=2&size=10&search=history"
    );
}

#[test]
fn rooms_list_endpoint_escapes_query_separators() {
    let url = rooms_list_endpoint(0, 20, "a&b=c d");
    assert_eq!(url, "/api/rooms?page=0&size=20&search=a%26b%3Dc+d");
}
