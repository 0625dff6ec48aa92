use actix_web::web;

pub mod routes {
    pub mod analysis;
    pub mod convo;
}

mod services {
    pub(crate) mod analysis;
    pub(crate) mod convo;
}

mod dtos {
    pub(crate) mod convo;
}

pub fn mount_conversations() -> actix_web::Scope {
    web::scope("/conversations")
        .service(routes::convo::get_conversations)
        .service(routes::convo::post_conversation)
        .service(routes::convo::get_conversation)
        .service(routes::convo::delete_conversation)
        .service(routes::convo::post_input)
        .service(routes::analysis::post_analysis)
}
