diesel::table! {
    genders (id) {
        id -> Integer,
        description -> Text,
    }
}

diesel::table! {
    professions (id) {
        id -> Integer,
        description -> Text,
    }
}

diesel::table! {
    statuses (id) {
        id -> Integer,
        description -> Text,
    }
}

diesel::table! {
    interests (id) {
        id -> Integer,
        description -> Text,
    }
}

diesel::table! {
    profiles (id) {
        id -> Integer,
        name -> Text,
        last_name -> Text,
        identification -> Text,
        slogan -> Text,
        gender_id -> Integer,
        profession_id -> Integer,
        status_id -> Integer,
        total_likes -> Integer,
        created_at -> Timestamp,
    }
}

diesel::table! {
    interest_profiles (profile_id, interest_id) {
        profile_id -> Integer,
        interest_id -> Integer,
    }
}

diesel::table! {
    users (id) {
        id -> Integer,
        username -> Text,
        password_hash -> Text,
        birthdate -> Date,
        bonus_likes -> Integer,
        profile_id -> Integer,
    }
}

diesel::table! {
    administrators (id) {
        id -> Integer,
        username -> Text,
        password_hash -> Text,
    }
}

diesel::table! {
    user_likes (id) {
        id -> Integer,
        user_id -> Integer,
        liked_profile_id -> Integer,
        like_date -> Timestamp,
        is_match -> Bool,
    }
}

diesel::table! {
    user_dislikes (id) {
        id -> Integer,
        user_id -> Integer,
        disliked_profile_id -> Integer,
        dislike_date -> Timestamp,
    }
}

diesel::table! {
    user_matches (id) {
        id -> Integer,
        user1_id -> Integer,
        user2_id -> Integer,
        match_date -> Timestamp,
    }
}

diesel::table! {
    messages (id) {
        id -> Integer,
        sender_id -> Integer,
        receiver_id -> Integer,
        body -> Text,
        sent_at -> Timestamp,
    }
}

diesel::joinable!(profiles -> genders (gender_id));
diesel::joinable!(profiles -> professions (profession_id));
diesel::joinable!(profiles -> statuses (status_id));
diesel::joinable!(users -> profiles (profile_id));
diesel::joinable!(interest_profiles -> profiles (profile_id));
diesel::joinable!(interest_profiles -> interests (interest_id));
diesel::joinable!(user_likes -> users (user_id));
diesel::joinable!(user_likes -> profiles (liked_profile_id));
diesel::joinable!(user_dislikes -> users (user_id));
diesel::joinable!(user_dislikes -> profiles (disliked_profile_id));

diesel::allow_tables_to_appear_in_same_query!(
    genders,
    professions,
    statuses,
    interests,
    profiles,
    interest_profiles,
    users,
    administrators,
    user_likes,
    user_dislikes,
    user_matches,
    messages,
);
