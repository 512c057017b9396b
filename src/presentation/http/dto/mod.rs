pub mod response_dto;
pub mod webhook_dto;

pub use response_dto::{
    ApiResponse, ErrorDetailDto, FeatureFlagsDto, HealthResponseDto, ListenerStatusDto,
    MessageResponseDto,
};
pub use webhook_dto::{DocumentRecordDto, WebhookPayloadDto};
