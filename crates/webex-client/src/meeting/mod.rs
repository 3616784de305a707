//! Meeting services
//!
//! Scheduling and joining meetings, managing invitees, and handling webinar
//! registration.

mod invitees;
mod meetings;
mod registrants;

pub use invitees::{
    BulkInviteeItem, InviteeBulkCreateRequest, InviteeCreateRequest, InviteeListOptions,
    InviteeUpdateRequest, MeetingInvitee, MeetingInviteesService,
};
pub use meetings::{
    AudioConnectionOptions, Invitee, Meeting, MeetingJoinInfo, MeetingListOptions, MeetingOptions,
    MeetingRequest, MeetingsService, Registration,
};
pub use registrants::{
    BulkRegistrantItem, CustomizedQuestion, MeetingRegistrant, MeetingRegistrantsService,
    RegistrantBulkCreateRequest, RegistrantCreateRequest, RegistrantListOptions,
    RegistrantStatusRequest, RegistrationForm, RegistrationFormOptions, RegistrationQuestion,
};
